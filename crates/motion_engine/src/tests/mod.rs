//! Scenario tests driving whole controllers through the public API

mod scenarios;
