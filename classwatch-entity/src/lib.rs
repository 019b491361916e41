// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Classwatch Entity
//!
//! Read-only display entities built from coordinator data.
//!
//! Entities follow the usual platform contract: a unique id, a device
//! grouping (one device per member), a name, a value or event payload, and
//! optional extra attributes. They are plain values; the renderer rebuilds
//! them from the latest snapshot whenever the coordinator notifies.
//!
//! Two entity kinds:
//!
//! - calendars ([`NextSessionCalendar`], [`SessionCalendar`])
//! - progress sensors ([`MemberProgressSensor`], [`ClassProgressSensor`])

pub mod calendar;
pub mod entity;
pub mod sensor;

pub use calendar::{
    build_next_session_calendars, build_session_calendars, CalendarEvent, NextSessionCalendar,
    SessionCalendar,
};
pub use entity::{DeviceInfo, EntityInfo};
pub use sensor::{
    build_class_sensors, build_member_sensors, round_percent, ClassProgressSensor,
    MemberProgressSensor,
};
