//! Builder that collects recognizer factories and produces a [`GestureEngine`].

use crate::config::{GestureConfig, HoldOptions};
use crate::dispatch::GestureDispatcher;
use crate::engine::GestureEngine;
use crate::error::GestureError;
use crate::recognizer::{GestureServices, Recognizer, RecognizerFactory};
use crate::recognizers::{self, builtin_factories};
use crate::registry::GestureRegistry;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::rc::Rc;
use tactile_core::{Clock, FrameClock, SystemClock};

/// Collects gesture definitions before the engine exists.
///
/// # Example
///
/// ```
/// use tactile_foundation::{GestureProvider, HoldOptions};
///
/// let mut provider = GestureProvider::new().with_hold(HoldOptions::new(500, 6.0));
/// provider.add_recognizer("noop", |_| Box::new(NoopRecognizer));
/// let engine = provider.build().expect("valid gesture names");
/// assert_eq!(
///     engine.registry().names().collect::<Vec<_>>(),
///     ["click", "press", "drag", "swipe", "hold", "noop"]
/// );
///
/// struct NoopRecognizer;
/// impl tactile_foundation::Recognizer for NoopRecognizer {}
/// ```
pub struct GestureProvider {
    config: GestureConfig,
    clock: Option<Rc<dyn Clock>>,
    frame_clock: Option<FrameClock>,
    dispatcher: Option<GestureDispatcher>,
    factories: IndexMap<String, RecognizerFactory, FxBuildHasher>,
}

impl GestureProvider {
    /// A provider with click, press, drag and swipe registered.
    pub fn new() -> Self {
        let mut provider = Self::empty();
        for (name, factory) in builtin_factories() {
            provider.factories.insert(name.to_owned(), factory);
        }
        provider
    }

    /// A provider with no recognizers.
    pub fn empty() -> Self {
        Self {
            config: GestureConfig::default(),
            clock: None,
            frame_clock: None,
            dispatcher: None,
            factories: IndexMap::default(),
        }
    }

    /// Registers `factory` under `name`. An existing name is replaced in place.
    pub fn add_recognizer(
        &mut self,
        name: impl Into<String>,
        factory: impl FnOnce(&GestureServices) -> Box<dyn Recognizer> + 'static,
    ) -> &mut Self {
        self.factories.insert(name.into(), Box::new(factory));
        self
    }

    /// Registers the long-press recognizer as `hold`.
    pub fn with_hold(mut self, options: HoldOptions) -> Self {
        self.factories
            .insert(recognizers::HOLD.to_owned(), recognizers::hold_factory(options));
        self
    }

    pub fn with_config(mut self, config: GestureConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_frame_clock(mut self, frame_clock: FrameClock) -> Self {
        self.frame_clock = Some(frame_clock);
        self
    }

    pub fn with_dispatcher(mut self, dispatcher: GestureDispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.factories.keys().map(String::as_str)
    }

    /// Invokes every factory once, in registration order, and builds the engine.
    pub fn build(self) -> Result<GestureEngine, GestureError> {
        if let Some(name) = self.factories.keys().find(|name| !is_valid_name(name)) {
            return Err(GestureError::InvalidName { name: name.clone() });
        }

        let services = GestureServices {
            clock: self
                .clock
                .unwrap_or_else(|| Rc::new(SystemClock::new())),
            frame_clock: self.frame_clock.unwrap_or_default(),
            dispatcher: self.dispatcher.unwrap_or_default(),
            config: self.config,
        };

        let mut registry = GestureRegistry::new();
        for (name, factory) in self.factories {
            log::debug!("registering gesture {name:?}");
            let recognizer = factory(&services);
            registry.insert(name, recognizer);
        }

        Ok(GestureEngine::new(services, registry))
    }
}

impl Default for GestureProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GestureProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureProvider")
            .field("config", &self.config)
            .field("gestures", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}
