//! Thread reply slots and the color state machine.
//!
//! A thread records at most one student reply and at most one instructor
//! reply. Its color is derived from which slots are populated:
//!
//! | color | student slot | instructor slot |
//! |-------|--------------|-----------------|
//! | 0     | empty        | empty           |
//! | 1     | empty        | populated       |
//! | 2     | populated    | empty           |
//! | 3     | populated    | populated       |
//!
//! The color is always recomputed from the slots after a write. A second
//! reply from the same role overwrites its slot and leaves the color as is.

use serde::{Deserialize, Serialize};

use crate::identity::Role;
use crate::{PostId, ThreadId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ThreadColor {
    Unanswered = 0,
    InstructorAnswered = 1,
    StudentAnswered = 2,
    Answered = 3,
}

impl ThreadColor {
    /// `2 * has_student + 1 * has_instructor`.
    pub fn from_slots(has_student: bool, has_instructor: bool) -> Self {
        match (has_student, has_instructor) {
            (false, false) => ThreadColor::Unanswered,
            (false, true) => ThreadColor::InstructorAnswered,
            (true, false) => ThreadColor::StudentAnswered,
            (true, true) => ThreadColor::Answered,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<ThreadColor> for u8 {
    fn from(color: ThreadColor) -> Self {
        color.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("thread color out of range: {0}")]
pub struct InvalidColor(pub i64);

impl TryFrom<u8> for ThreadColor {
    type Error = InvalidColor;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        ThreadColor::try_from(code as i64)
    }
}

impl TryFrom<i64> for ThreadColor {
    type Error = InvalidColor;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ThreadColor::Unanswered),
            1 => Ok(ThreadColor::InstructorAnswered),
            2 => Ok(ThreadColor::StudentAnswered),
            3 => Ok(ThreadColor::Answered),
            other => Err(InvalidColor(other)),
        }
    }
}

/// The reply slots of one thread.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadState {
    pub thread_id: ThreadId,
    pub student_reply: Option<PostId>,
    pub instructor_reply: Option<PostId>,
}

/// What a single slot write did to a thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: ThreadColor,
    pub to: ThreadColor,
    /// The reply previously recorded in the written slot, if any.
    pub overwritten: Option<PostId>,
}

impl Transition {
    pub fn changed_color(&self) -> bool {
        self.from != self.to
    }
}

impl ThreadState {
    /// A freshly authored thread: both slots empty.
    pub fn new(thread_id: ThreadId) -> Self {
        Self {
            thread_id,
            student_reply: None,
            instructor_reply: None,
        }
    }

    pub fn color(&self) -> ThreadColor {
        ThreadColor::from_slots(self.student_reply.is_some(), self.instructor_reply.is_some())
    }

    /// The slot a reply from `role` is recorded in.
    pub fn slot(&self, role: Role) -> Option<PostId> {
        match role {
            Role::Student => self.student_reply,
            Role::Instructor => self.instructor_reply,
        }
    }

    /// Record `reply` in the slot matching `role`, replacing any prior value.
    pub fn record_reply(&mut self, role: Role, reply: PostId) -> Transition {
        let from = self.color();
        let slot = match role {
            Role::Student => &mut self.student_reply,
            Role::Instructor => &mut self.instructor_reply,
        };
        let overwritten = slot.replace(reply);
        Transition {
            from,
            to: self.color(),
            overwritten,
        }
    }

    /// Clear a slot whose reply was removed.
    pub fn clear_reply(&mut self, reply: PostId) -> Option<Transition> {
        let from = self.color();
        let slot = if self.student_reply == Some(reply) {
            &mut self.student_reply
        } else if self.instructor_reply == Some(reply) {
            &mut self.instructor_reply
        } else {
            return None;
        };
        let overwritten = slot.take();
        Some(Transition {
            from,
            to: self.color(),
            overwritten,
        })
    }
}
