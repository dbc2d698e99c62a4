use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: u32,
    pub name: String,
    pub done: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub due: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}
