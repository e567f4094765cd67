pub mod api;
pub mod cache;
pub mod db;
pub mod entity;
pub mod repository;
