pub mod auth_service;
pub mod availability;
pub mod blocks;
pub mod booking_service;
pub mod page_tree;
