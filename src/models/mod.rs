pub mod project;
pub mod task;
pub mod user;

pub use project::Project;
pub use task::{CreatedTask, NewTaskRequest, Task, TaskStatus};
pub use user::{NewUser, Role, User};
