pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::AuthorizationService;
pub use domain::resource_id::{
    extract, extract_all, host_group_name, reservation_id, reservation_order_id,
    resource_group_name, sql_server_name, subscription_id, vm_name,
};
pub use domain::{Authorization, DomainError, IdComponent, IdError};
