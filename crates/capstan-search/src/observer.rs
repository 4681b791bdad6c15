// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Event notification between a search engine and its subscribers.
//!
//! Engines publish a `SearchEvent` after every applied move and on abort.
//! The event carries the step code, a reference to the working solution, and
//! a reference to the move just made (absent on abort). Subscribers are
//! plain callbacks owned by the engine; they are invoked synchronously, in
//! subscription order, and cannot influence the search. External
//! cancellation goes through a termination criterion instead.

use std::fmt;

/// The step code of a search iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStep {
    /// A move was applied to the working solution.
    MoveMade,

    /// The applied move improved upon the best-known solution.
    ImprovementMade,

    /// The search aborted without applying a move (e.g. no admissible move).
    Aborted,
}

impl fmt::Display for SearchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStep::MoveMade => write!(f, "Move Made"),
            SearchStep::ImprovementMade => write!(f, "Improvement Made"),
            SearchStep::Aborted => write!(f, "Aborted"),
        }
    }
}

/// A notification published by a search engine.
#[derive(Debug)]
pub struct SearchEvent<'a, S, M> {
    /// The step code of the current iteration.
    pub step: SearchStep,

    /// The working solution after the step.
    pub solution: &'a S,

    /// The move that was applied, when applicable.
    pub current_move: Option<&'a M>,
}

impl<'a, S, M> SearchEvent<'a, S, M> {
    /// Creates a new event.
    #[inline]
    pub fn new(step: SearchStep, solution: &'a S, current_move: Option<&'a M>) -> Self {
        Self {
            step,
            solution,
            current_move,
        }
    }
}

/// A subscriber to search events.
pub trait SearchObserver<S, M> {
    /// Returns the name of the observer.
    fn name(&self) -> &str;

    /// Called synchronously after each published event.
    fn on_event(&mut self, event: &SearchEvent<'_, S, M>);
}

impl<S, M> fmt::Debug for dyn SearchObserver<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SearchObserver({})", self.name())
    }
}

/// The subscriber list owned by a search engine.
pub struct SubscriberList<S, M> {
    observers: Vec<Box<dyn SearchObserver<S, M>>>,
}

impl<S, M> Default for SubscriberList<S, M> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<S, M> SubscriberList<S, M> {
    /// Creates an empty subscriber list.
    #[inline]
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Appends an observer; it will be notified after all earlier
    /// subscribers.
    #[inline]
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: SearchObserver<S, M> + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Appends an already boxed observer.
    #[inline]
    pub fn subscribe_boxed(&mut self, observer: Box<dyn SearchObserver<S, M>>) {
        self.observers.push(observer);
    }

    /// The number of subscribed observers.
    #[inline]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Returns `true` if no observers are subscribed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Delivers `event` to every observer in subscription order.
    #[inline]
    pub fn notify(&mut self, event: &SearchEvent<'_, S, M>) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }
}

impl<S, M> fmt::Debug for SubscriberList<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberList")
            .field("observers", &self.observers.len())
            .finish()
    }
}
