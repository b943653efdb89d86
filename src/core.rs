// SPDX-License-Identifier: GPL-3.0

pub mod catalog;
pub mod database;
pub mod errors;
pub mod models;

pub use database::init_database;
