pub mod task;
pub mod user;

pub use task::{
    CompletionQuery, MessageResponse, StatusFilter, Task, TaskCreate, TaskPriority, TaskQuery,
    TaskResponse, TaskUpdate, TasksResponse,
};
pub use user::{User, UserResponse};
