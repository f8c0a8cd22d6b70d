//! CallSession - The single in-flight (or idle) call
//!
//! Transitions:
//! - Idle -> Outgoing (dial) -> Active (callee picks up)
//! - Idle -> Incoming (ring) -> Active (answer)
//! - Incoming/Outgoing/Active -> Idle (end, or miss while Incoming)
//!
//! Delayed transitions (`connect_outgoing`, `miss`) carry the id of the call
//! they were scheduled for and only apply while that same call is still in
//! the expected status.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{CallRecord, Contact};
use crate::domain::errors::PhoneError;
use crate::domain::value_objects::{CallDirection, CallOutcome, CallStatus};

/// Payload of a non-idle call session
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OngoingCall {
    id: Uuid,
    status: CallStatus,
    direction: CallDirection,
    number: String,
    name: Option<String>,
    start_time: DateTime<Utc>,
}

impl OngoingCall {
    /// Place an outgoing call
    pub fn dial(number: String, name: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: CallStatus::Outgoing,
            direction: CallDirection::Outgoing,
            number,
            name,
            start_time: now,
        }
    }

    /// Receive a call from a known contact
    pub fn ring(contact: &Contact, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: CallStatus::Incoming,
            direction: CallDirection::Incoming,
            number: contact.phone_number.clone(),
            name: Some(contact.name.clone()),
            start_time: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn direction(&self) -> CallDirection {
        self.direction
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Name if known, otherwise the number
    pub fn caller_label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.number)
    }

    /// Close the call and produce its history entry
    ///
    /// Only a call that reached `Active` accrues duration, and its outcome
    /// follows the direction it was placed in, so a dialed call that was
    /// picked up is recorded as `Outgoing`. A ringing incoming call becomes
    /// `Missed`, an unanswered outgoing call stays `Outgoing`.
    fn finish(self, now: DateTime<Utc>) -> CallRecord {
        let (outcome, duration_seconds) = match self.status {
            CallStatus::Active | CallStatus::Held => {
                let elapsed = (now - self.start_time).num_seconds().max(0) as u64;
                (CallOutcome::from(self.direction), elapsed)
            }
            CallStatus::Outgoing => (CallOutcome::Outgoing, 0),
            CallStatus::Incoming | CallStatus::Idle => (CallOutcome::Missed, 0),
        };

        CallRecord::new(
            self.number,
            self.name,
            self.start_time,
            now,
            duration_seconds,
            outcome,
        )
    }
}

/// CallSession - Idle, or exactly one ongoing call
#[derive(Debug, Clone, Default)]
pub struct CallSession {
    current: Option<OngoingCall>,
}

impl CallSession {
    pub fn status(&self) -> CallStatus {
        self.current
            .as_ref()
            .map(OngoingCall::status)
            .unwrap_or(CallStatus::Idle)
    }

    pub fn current(&self) -> Option<&OngoingCall> {
        self.current.as_ref()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Begin a new call; only valid while idle
    pub fn begin(
        &mut self,
        operation: &'static str,
        call: OngoingCall,
    ) -> Result<&OngoingCall, PhoneError> {
        if let Some(existing) = &self.current {
            return Err(PhoneError::invalid_transition(operation, existing.status));
        }
        Ok(&*self.current.insert(call))
    }

    /// Outgoing -> Active, if `call_id` is still the outgoing call
    pub fn connect_outgoing(&mut self, call_id: Uuid) -> Option<&OngoingCall> {
        match self.current.as_mut() {
            Some(call) if call.id == call_id && call.status == CallStatus::Outgoing => {
                call.status = CallStatus::Active;
                Some(&*call)
            }
            _ => None,
        }
    }

    /// Incoming -> Active; duration is measured from the answer
    pub fn answer(&mut self, now: DateTime<Utc>) -> Result<&OngoingCall, PhoneError> {
        let status = self.status();
        match self.current.as_mut() {
            Some(call) if call.status == CallStatus::Incoming => {
                call.status = CallStatus::Active;
                call.start_time = now;
                Ok(&*call)
            }
            _ => Err(PhoneError::invalid_transition("answer call", status)),
        }
    }

    /// Incoming/Outgoing/Active -> Idle
    pub fn end(&mut self, now: DateTime<Utc>) -> Result<CallRecord, PhoneError> {
        let status = self.status();
        if !status.is_endable() {
            return Err(PhoneError::invalid_transition("end call", status));
        }
        match self.current.take() {
            Some(call) => Ok(call.finish(now)),
            None => Err(PhoneError::invalid_transition("end call", status)),
        }
    }

    /// Incoming -> Idle as a missed call, if `call_id` is still ringing
    pub fn miss(&mut self, call_id: Uuid, now: DateTime<Utc>) -> Option<CallRecord> {
        let ringing = matches!(
            &self.current,
            Some(call) if call.id == call_id && call.status == CallStatus::Incoming
        );
        if !ringing {
            return None;
        }
        self.current.take().map(|call| call.finish(now))
    }
}
