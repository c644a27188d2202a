//! Subscriptions
//!
//! A [`Sub`] declares which external event sources a program currently
//! listens to. Programs recompute their subscriptions from the model after
//! every update; the host loop consults the latest declaration when an event
//! source fires.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// External event source a subscription listens to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubSource {
    /// Periodic timer firing every `interval` of host time
    Every(Duration),
    /// Named inbound port fed by the embedding application
    Port(String),
}

/// Payload of a fired event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubEvent {
    /// A periodic timer fired; `now` is the host clock at firing time
    Tick {
        /// Host time since the loop started
        now: Duration,
    },
    /// A value was pushed into a port
    Port(String),
}

type Tagger<Msg> = Rc<dyn Fn(SubEvent) -> Msg>;

/// One source together with the function turning its events into messages.
pub struct Subscription<Msg> {
    source: SubSource,
    tagger: Tagger<Msg>,
}

impl<Msg> Clone for Subscription<Msg> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            tagger: Rc::clone(&self.tagger),
        }
    }
}

impl<Msg> Subscription<Msg> {
    /// The source this subscription listens to.
    pub fn source(&self) -> &SubSource {
        &self.source
    }
}

/// A set of subscriptions producing messages of type `Msg`.
pub struct Sub<Msg> {
    entries: Vec<Subscription<Msg>>,
}

impl<Msg> Clone for Sub<Msg> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<Msg: 'static> Sub<Msg> {
    /// Listen to nothing.
    pub fn none() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Fire `tagger` every `interval` of host time.
    pub fn every(interval: Duration, tagger: impl Fn(Duration) -> Msg + 'static) -> Self {
        Self::single(SubSource::Every(interval), move |event| match event {
            SubEvent::Tick { now } => tagger(now),
            SubEvent::Port(_) => tagger(Duration::ZERO),
        })
    }

    /// Fire `tagger` whenever a value is pushed into port `name`.
    pub fn port(name: impl Into<String>, tagger: impl Fn(String) -> Msg + 'static) -> Self {
        Self::single(SubSource::Port(name.into()), move |event| match event {
            SubEvent::Port(value) => tagger(value),
            SubEvent::Tick { now } => tagger(now.as_millis().to_string()),
        })
    }

    fn single(source: SubSource, tagger: impl Fn(SubEvent) -> Msg + 'static) -> Self {
        Self {
            entries: vec![Subscription {
                source,
                tagger: Rc::new(tagger),
            }],
        }
    }

    /// Listen to every source of every subscription in `subs`.
    pub fn batch(subs: impl IntoIterator<Item = Sub<Msg>>) -> Self {
        Self {
            entries: subs.into_iter().flat_map(|sub| sub.entries).collect(),
        }
    }

    /// Convert every message these subscriptions will produce.
    pub fn map<B: 'static>(self, f: impl Fn(Msg) -> B + 'static) -> Sub<B> {
        let f = Rc::new(f);
        Sub {
            entries: self
                .entries
                .into_iter()
                .map(|entry| {
                    let f = Rc::clone(&f);
                    let tagger = entry.tagger;
                    Subscription {
                        source: entry.source,
                        tagger: Rc::new(move |event| f(tagger(event))) as Tagger<B>,
                    }
                })
                .collect(),
        }
    }

    /// Whether no source is listened to.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of subscriptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Distinct sources, in declaration order.
    pub fn sources(&self) -> Vec<SubSource> {
        let mut sources: Vec<SubSource> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !sources.contains(&entry.source) {
                sources.push(entry.source.clone());
            }
        }
        sources
    }

    /// Messages produced by every subscription listening to `source`.
    pub fn fire(&self, source: &SubSource, event: &SubEvent) -> Vec<Msg> {
        self.entries
            .iter()
            .filter(|entry| &entry.source == source)
            .map(|entry| (entry.tagger)(event.clone()))
            .collect()
    }
}

impl<Msg: 'static> Default for Sub<Msg> {
    fn default() -> Self {
        Self::none()
    }
}

impl<Msg> fmt::Debug for Sub<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| &entry.source))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Tick(Duration),
        Line(String),
    }

    #[test]
    fn fire_selects_matching_source() {
        let second = Duration::from_secs(1);
        let sub = Sub::batch([Sub::every(second, Msg::Tick), Sub::port("stdin", Msg::Line)]);

        let ticks = sub.fire(&SubSource::Every(second), &SubEvent::Tick { now: second });
        assert_eq!(ticks, vec![Msg::Tick(second)]);

        let lines = sub.fire(
            &SubSource::Port("stdin".into()),
            &SubEvent::Port("hello".into()),
        );
        assert_eq!(lines, vec![Msg::Line("hello".into())]);

        assert!(sub
            .fire(&SubSource::Port("other".into()), &SubEvent::Port("x".into()))
            .is_empty());
    }

    #[test]
    fn map_wraps_tagged_messages() {
        let sub = Sub::port("names", Msg::Line).map(|msg| vec![msg]);
        let out = sub.fire(&SubSource::Port("names".into()), &SubEvent::Port("Al".into()));
        assert_eq!(out, vec![vec![Msg::Line("Al".into())]]);
    }

    #[test]
    fn sources_are_deduplicated() {
        let sub = Sub::batch([
            Sub::port("a", Msg::Line),
            Sub::port("a", Msg::Line),
            Sub::every(Duration::from_millis(10), Msg::Tick),
        ]);
        assert_eq!(sub.len(), 3);
        assert_eq!(
            sub.sources(),
            vec![
                SubSource::Port("a".into()),
                SubSource::Every(Duration::from_millis(10))
            ]
        );
    }

    #[test]
    fn none_is_empty() {
        let sub: Sub<Msg> = Sub::none();
        assert!(sub.is_empty());
        assert!(sub.sources().is_empty());
    }
}
