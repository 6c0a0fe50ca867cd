pub mod catalog;
pub mod champion_service;
pub mod item_service;
pub mod match_store;
pub mod object_service;
pub mod snapshot;
pub mod storage;
pub mod view_builder;
pub mod websocket;
