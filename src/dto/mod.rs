pub mod champion_dto;
pub mod item_dto;
pub mod match_dto;
pub mod object_dto;
pub mod request_dto;
pub mod saved_team_dto;
pub mod view_dto;

/// Label meaning "no constraint" in the dictionary filters.
pub const ALL_LABEL: &str = "전체";
