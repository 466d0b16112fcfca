use std::collections::VecDeque;

use crate::grid::Position;
use crate::input::{Direction, direction_change_is_valid};

/// Mutable snake state and movement buffering behavior.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    buffered_direction: Option<Direction>,
    growth_pending: u32,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            direction,
            buffered_direction: None,
            growth_pending: 0,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
            buffered_direction: None,
            growth_pending: 0,
        }
    }

    /// Buffers a direction change for the next tick.
    ///
    /// Reversals of the current direction are dropped silently. Any legal
    /// direction replaces an earlier buffered one, so only the last legal
    /// input before a tick boundary takes effect.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if !direction_change_is_valid(self.direction, direction) {
            return;
        }
        self.buffered_direction = Some(direction);
    }

    /// Promotes the buffered direction, if any, to the current direction.
    pub fn apply_buffered_direction(&mut self) {
        if let Some(next) = self.buffered_direction.take() {
            if direction_change_is_valid(self.direction, next) {
                self.direction = next;
            }
        }
    }

    /// Returns the head position one step ahead in the current direction.
    ///
    /// The result is not wrapped; the caller applies the wall policy.
    #[must_use]
    pub fn next_head(&self) -> Position {
        let head = self.head();
        let (dx, dy) = self.direction.delta();
        Position {
            x: head.x + dx,
            y: head.y + dy,
        }
    }

    /// Prepends `head` and drops the tail unless growth is pending.
    pub fn move_to(&mut self, head: Position) {
        self.body.push_front(head);
        if self.growth_pending == 0 {
            let _ = self.body.pop_back();
        } else {
            self.growth_pending -= 1;
        }
    }

    /// Moves one tile in the current direction without any wall handling.
    pub fn move_forward(&mut self) {
        let head = self.next_head();
        self.move_to(head);
    }

    /// Schedules one extra segment; the next move keeps its tail.
    pub fn grow(&mut self) {
        self.growth_pending += 1;
    }

    /// Returns true when moving the head to `head` would hit the body.
    ///
    /// The tail cell is excluded when the move is going to vacate it.
    #[must_use]
    pub fn would_collide(&self, head: Position) -> bool {
        let checked = if self.growth_pending == 0 {
            self.body.len().saturating_sub(1)
        } else {
            self.body.len()
        };

        self.body.iter().take(checked).any(|segment| *segment == head)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn growth_pending(&self) -> u32 {
        self.growth_pending
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator {
        self.body.iter()
    }
}
