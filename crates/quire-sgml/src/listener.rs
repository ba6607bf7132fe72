//! The listener contract and a collecting listener.

use crate::event::SgmlEvent;

/// What a listener wants the parser to do after a callback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Flow {
    /// Keep parsing.
    #[default]
    Continue,
    /// Stop the parse; `parse()` returns
    /// [`ParseError::Aborted`](crate::ParseError::Aborted) with this reason.
    Abort(String),
}

/// Receives parse events synchronously, in document order.
///
/// Each callback gets the whole event so a listener can forward or store it
/// without re-assembling it. Every method defaults to [`Flow::Continue`];
/// implement only the ones you care about.
pub trait SgmlListener {
    /// Called for [`SgmlEvent::StartTag`].
    fn start_tag(&mut self, _event: &SgmlEvent) -> Flow {
        Flow::Continue
    }

    /// Called for [`SgmlEvent::EndTag`].
    fn end_tag(&mut self, _event: &SgmlEvent) -> Flow {
        Flow::Continue
    }

    /// Called for [`SgmlEvent::CharacterData`].
    fn character_data(&mut self, _event: &SgmlEvent) -> Flow {
        Flow::Continue
    }

    /// Called for [`SgmlEvent::ParsingFinished`].
    fn parsing_finished(&mut self, _event: &SgmlEvent) -> Flow {
        Flow::Continue
    }

    /// Route `event` to the matching callback.
    fn handle_event(&mut self, event: &SgmlEvent) -> Flow {
        match event {
            SgmlEvent::StartTag { .. } => self.start_tag(event),
            SgmlEvent::EndTag { .. } => self.end_tag(event),
            SgmlEvent::CharacterData { .. } => self.character_data(event),
            SgmlEvent::ParsingFinished => self.parsing_finished(event),
        }
    }
}

/// A listener that records every event it receives.
#[derive(Debug, Clone, Default)]
pub struct EventCollector {
    events: Vec<SgmlEvent>,
}

impl EventCollector {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The events received so far.
    #[must_use]
    pub fn events(&self) -> &[SgmlEvent] {
        &self.events
    }

    /// Consume the collector, returning its events.
    #[must_use]
    pub fn into_events(self) -> Vec<SgmlEvent> {
        self.events
    }
}

impl SgmlListener for EventCollector {
    fn handle_event(&mut self, event: &SgmlEvent) -> Flow {
        self.events.push(event.clone());
        Flow::Continue
    }
}
