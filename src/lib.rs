//! zipweather - ZIP code weather lookup over SOAP
//!
//! The library holds the store pieces (state, actions, effects, reducer),
//! the SOAP transport and the components, so they can be tested without a
//! terminal.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod layout;
pub mod reducer;
pub mod soap;
pub mod state;
