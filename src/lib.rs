// src/lib.rs

//! Dropdown popup menus for ratatui applications.
//!
//! A [`popup::PopupMenu`] is configured with chained setters, filled with
//! [`popup::MenuItem`]s and then shown anchored below some area of the screen.
//! Row binding and click forwarding live in [`popup::MenuAdapter`]; drawing is
//! done by [`popup::PopupMenuWidget`].

pub mod popup;
