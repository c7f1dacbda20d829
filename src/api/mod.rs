//! Todoist REST API client
//!
//! Layered leaves-first:
//!
//! - [`classify`] turns a status code and body into one [`ApiError`]
//! - [`transport`] runs one logical request with retry and backoff
//! - [`client`] exposes typed operations over the transport
//! - [`priority`] converts between user and API priority values
//!
//! ## Retry policy
//!
//! - **2xx** returns immediately
//! - **401** and other **4xx** fail on the first attempt
//! - **429** waits the full rate-limit window, then retries
//! - **5xx** and network failures retry with 1, 2, 4 unit backoff
//! - At most 4 attempts per call

pub mod classify;
pub mod client;
mod error;
pub mod priority;
pub mod transport;
mod types;

pub use client::TodoistClient;
pub use error::{ApiError, ErrorKind};
pub use priority::{PriorityError, format_priority, parse_priority};
pub use transport::{DEFAULT_BASE_URL, HttpMethod, Request, Response, RetryPolicy, Transport};
pub use types::{
    CompletedQuery, CompletedTask, CompletedTasks, CreateProjectRequest, CreateTaskRequest,
    Deadline, Due, Label, Listing, Project, Task, TaskDuration,
};
