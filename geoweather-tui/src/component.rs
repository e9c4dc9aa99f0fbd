//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A pure UI component that renders from props and emits actions
///
/// 1. Props carry everything needed to render, borrowed from state
/// 2. `handle_event` returns actions and never mutates application state
/// 3. `render` is a function of props
pub trait Component<A> {
    type Props<'a>;

    /// Map an event to actions. Render-only components keep the default.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
