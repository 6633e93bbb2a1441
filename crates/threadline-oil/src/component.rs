use crate::node::Node;
use crate::theme::ThemeTokens;

/// Everything a view needs from its host: the theme and the available width.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    theme: &'a ThemeTokens,
    width: usize,
}

impl<'a> ViewContext<'a> {
    pub fn new(theme: &'a ThemeTokens, width: usize) -> Self {
        Self { theme, width }
    }

    pub fn theme(&self) -> &'a ThemeTokens {
        self.theme
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Same theme, narrower area.
    pub fn narrowed(&self, by: usize) -> Self {
        Self {
            theme: self.theme,
            width: self.width.saturating_sub(by),
        }
    }
}

impl Default for ViewContext<'static> {
    fn default() -> Self {
        Self::new(ThemeTokens::default_ref(), 80)
    }
}

pub trait Component {
    fn view(&self, ctx: &ViewContext<'_>) -> Node;
}

impl<F> Component for F
where
    F: Fn(&ViewContext<'_>) -> Node,
{
    fn view(&self, ctx: &ViewContext<'_>) -> Node {
        (self)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::text;
    use crate::render::render_plain;

    struct Greeting {
        message: String,
    }

    impl Component for Greeting {
        fn view(&self, _ctx: &ViewContext<'_>) -> Node {
            text(&self.message)
        }
    }

    #[test]
    fn component_renders_its_view() {
        let ctx = ViewContext::default();
        let c = Greeting {
            message: "Hello".to_string(),
        };
        assert_eq!(render_plain(&c.view(&ctx), ctx.width()), "Hello");
    }

    #[test]
    fn closure_implements_component() {
        let ctx = ViewContext::default();
        let closure = |ctx: &ViewContext<'_>| text(format!("width {}", ctx.width()));
        assert_eq!(render_plain(&closure.view(&ctx), 80), "width 80");
    }

    #[test]
    fn narrowed_saturates() {
        let ctx = ViewContext::new(ThemeTokens::default_ref(), 4);
        assert_eq!(ctx.narrowed(10).width(), 0);
    }
}
