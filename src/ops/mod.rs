pub mod attach;
pub mod controls;
pub mod forms;
pub mod map;
pub mod search;
pub mod suggest_list;
pub mod widget;
