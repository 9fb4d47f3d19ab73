pub mod click;
pub mod drag;
pub mod hold;
pub mod press;
pub mod swipe;

pub use click::ClickRecognizer;
pub use drag::DragRecognizer;
pub use hold::HoldRecognizer;
pub use press::PressRecognizer;
pub use swipe::SwipeRecognizer;

use crate::config::HoldOptions;
use crate::recognizer::{GestureServices, Recognizer, RecognizerFactory};

pub const CLICK: &str = "click";
pub const PRESS: &str = "press";
pub const DRAG: &str = "drag";
pub const SWIPE: &str = "swipe";
pub const HOLD: &str = "hold";

/// Built-in recognizers in registration (and therefore dispatch) order.
pub fn builtin_factories() -> [(&'static str, RecognizerFactory); 4] {
    [
        (CLICK, Box::new(click_factory)),
        (PRESS, Box::new(press_factory)),
        (DRAG, Box::new(drag_factory)),
        (SWIPE, Box::new(swipe_factory)),
    ]
}

fn click_factory(services: &GestureServices) -> Box<dyn Recognizer> {
    Box::new(ClickRecognizer::new(
        services.config.click,
        services.dispatcher.clone(),
    ))
}

fn press_factory(services: &GestureServices) -> Box<dyn Recognizer> {
    Box::new(PressRecognizer::new(services.dispatcher.clone()))
}

fn drag_factory(services: &GestureServices) -> Box<dyn Recognizer> {
    Box::new(DragRecognizer::new(services.config.drag, services))
}

fn swipe_factory(services: &GestureServices) -> Box<dyn Recognizer> {
    Box::new(SwipeRecognizer::new(
        services.config.swipe,
        services.dispatcher.clone(),
    ))
}

pub fn hold_factory(options: HoldOptions) -> RecognizerFactory {
    Box::new(move |services: &GestureServices| -> Box<dyn Recognizer> {
        Box::new(HoldRecognizer::new(options, services))
    })
}
