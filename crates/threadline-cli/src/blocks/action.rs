//! The single action callback contract
//!
//! Every interactive element, whichever block it came from, reports a click
//! as `(action_id, value)`. Identifiers are already normalized by the block
//! model, so a target is invoked exactly as it was registered.

use threadline_core::ButtonElement;

/// Receives every click from a rendered block sequence.
pub trait ActionHandler {
    fn on_action(&self, action_id: &str, value: &str);
}

impl<F> ActionHandler for F
where
    F: Fn(&str, &str),
{
    fn on_action(&self, action_id: &str, value: &str) {
        (self)(action_id, value)
    }
}

/// A clickable element registered while rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTarget {
    /// 1-based hotkey shown next to the button
    pub hotkey: usize,
    pub label: String,
    pub action_id: String,
    pub value: String,
}

impl ActionTarget {
    pub fn invoke(&self, handler: &dyn ActionHandler) {
        handler.on_action(&self.action_id, &self.value);
    }
}

/// Full detail behind a truncated display element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub label: String,
    pub detail: String,
    pub reference_id: String,
}

/// Collects interactive targets and inspection entries in visual order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRegistry {
    targets: Vec<ActionTarget>,
    inspections: Vec<Inspection>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a button, returning its hotkey.
    pub fn register(&mut self, button: &ButtonElement) -> usize {
        let hotkey = self.targets.len() + 1;
        self.targets.push(ActionTarget {
            hotkey,
            label: button.label().to_string(),
            action_id: button.action_id.clone(),
            value: button.value.clone(),
        });
        hotkey
    }

    pub fn inspect(&mut self, inspection: Inspection) {
        self.inspections.push(inspection);
    }

    pub fn targets(&self) -> &[ActionTarget] {
        &self.targets
    }

    pub fn inspections(&self) -> &[Inspection] {
        &self.inspections
    }

    pub fn into_parts(self) -> (Vec<ActionTarget>, Vec<Inspection>) {
        (self.targets, self.inspections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn closures_are_handlers() {
        let seen = RefCell::new(Vec::new());
        let handler = |id: &str, value: &str| seen.borrow_mut().push((id.to_string(), value.to_string()));
        handler.on_action("view_article", "a1");
        assert_eq!(*seen.borrow(), vec![("view_article".to_string(), "a1".to_string())]);
    }

    #[test]
    fn hotkeys_follow_registration_order() {
        let mut registry = ActionRegistry::new();
        assert_eq!(registry.register(&ButtonElement::new("A")), 1);
        assert_eq!(registry.register(&ButtonElement::new("B").with_action("b", "v")), 2);

        let labels: Vec<&str> = registry.targets().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["A", "B"]);
        assert_eq!(registry.targets()[0].action_id, "button");
        assert_eq!(registry.targets()[1].value, "v");
    }
}
