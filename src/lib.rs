//! Campus Advisor - Voice-Driven Student Advising Assistant
//!
//! This crate implements a multi-turn slot-filling dialog engine that
//! collects a student's question context (scope, faculty, program, optional
//! specialization and year level, topic) and delegates the final question
//! to a remote advising catalog service.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
