//! The two quadrature lines as interrupt-driven inputs.

use embassy_futures::select::select;
use embassy_stm32::exti::ExtiInput;
use encoder_logic::LineState;

/// Encoder channels A and B on their EXTI lines.
pub struct QuadratureLines {
    a: ExtiInput<'static>,
    b: ExtiInput<'static>,
}

impl QuadratureLines {
    pub fn new(a: ExtiInput<'static>, b: ExtiInput<'static>) -> Self {
        Self { a, b }
    }

    /// Sample both lines together.
    pub fn level(&self) -> LineState {
        LineState::new(self.a.is_high(), self.b.is_high())
    }

    /// Resolve on the next edge of either line. Which line fired does not
    /// matter: the decoder re-samples both and compares against its
    /// remembered pair, since the other line may have moved as well.
    pub async fn wait_for_edge(&mut self) {
        select(self.a.wait_for_any_edge(), self.b.wait_for_any_edge()).await;
    }
}
