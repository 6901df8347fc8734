//! Component extraction from Azure resource identifiers.
//!
//! Resource identifiers are treated as opaque text: each component kind owns a
//! fixed pattern with exactly one capturing group, and extraction returns the
//! text of that group for the leftmost match.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

const RESOURCE_GROUP_PATTERN: &str = r"/resourceGroups/([^/]+)/";
const SUBSCRIPTION_PATTERN: &str = r"/subscriptions/([^/]+)(?:/.*)?$";
const RESERVATION_PATTERN: &str =
    r"(?i:/Microsoft\.Capacity)/reservationOrders/[^/]+/reservations/([^/]+)(?:/.*)?$";
const RESERVATION_ORDER_PATTERN: &str =
    r"(?i:/Microsoft\.Capacity)/reservationOrders/([^/]+)(?:/.*)?$";
const HOST_GROUP_PATTERN: &str = r"/providers/Microsoft\.Compute/hostGroups/([^/]+)(?:/.*)?$";
const VM_NAME_PATTERN: &str = r"providers/Microsoft\.Compute/virtualMachines/([^/]+)(?:/.*)?$";
const SQL_SERVER_PATTERN: &str = r"/Microsoft\.Sql/servers/([^/]+)(?:/.*)?$";

fn compile(pattern: &'static str) -> Regex {
    Regex::new(pattern).unwrap()
}

static RESOURCE_GROUP_RE: LazyLock<Regex> = LazyLock::new(|| compile(RESOURCE_GROUP_PATTERN));
static SUBSCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| compile(SUBSCRIPTION_PATTERN));
static RESERVATION_RE: LazyLock<Regex> = LazyLock::new(|| compile(RESERVATION_PATTERN));
static RESERVATION_ORDER_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(RESERVATION_ORDER_PATTERN));
static HOST_GROUP_RE: LazyLock<Regex> = LazyLock::new(|| compile(HOST_GROUP_PATTERN));
static VM_NAME_RE: LazyLock<Regex> = LazyLock::new(|| compile(VM_NAME_PATTERN));
static SQL_SERVER_RE: LazyLock<Regex> = LazyLock::new(|| compile(SQL_SERVER_PATTERN));

/// The kinds of component that can be pulled out of a resource identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdComponent {
    ResourceGroup,
    Subscription,
    Reservation,
    ReservationOrder,
    HostGroup,
    Vm,
    SqlServer,
}

impl IdComponent {
    pub const ALL: [IdComponent; 7] = [
        IdComponent::Subscription,
        IdComponent::ResourceGroup,
        IdComponent::ReservationOrder,
        IdComponent::Reservation,
        IdComponent::HostGroup,
        IdComponent::Vm,
        IdComponent::SqlServer,
    ];

    /// Human-readable label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            IdComponent::ResourceGroup => "Resource Group name",
            IdComponent::Subscription => "Subscription ID",
            IdComponent::Reservation => "Reservation ID",
            IdComponent::ReservationOrder => "Reservation Order ID",
            IdComponent::HostGroup => "Hostgroup name",
            IdComponent::Vm => "VM name",
            IdComponent::SqlServer => "SQL Server name",
        }
    }

    /// Name accepted on the command line.
    pub fn cli_name(&self) -> &'static str {
        match self {
            IdComponent::ResourceGroup => "resource-group",
            IdComponent::Subscription => "subscription",
            IdComponent::Reservation => "reservation",
            IdComponent::ReservationOrder => "reservation-order",
            IdComponent::HostGroup => "host-group",
            IdComponent::Vm => "vm",
            IdComponent::SqlServer => "sql-server",
        }
    }

    pub fn pattern(&self) -> &'static Regex {
        match self {
            IdComponent::ResourceGroup => &*RESOURCE_GROUP_RE,
            IdComponent::Subscription => &*SUBSCRIPTION_RE,
            IdComponent::Reservation => &*RESERVATION_RE,
            IdComponent::ReservationOrder => &*RESERVATION_ORDER_RE,
            IdComponent::HostGroup => &*HOST_GROUP_RE,
            IdComponent::Vm => &*VM_NAME_RE,
            IdComponent::SqlServer => &*SQL_SERVER_RE,
        }
    }
}

impl fmt::Display for IdComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IdComponent {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        IdComponent::ALL
            .into_iter()
            .find(|c| c.cli_name() == wanted)
            .ok_or_else(|| IdError::UnknownComponent(s.to_string()))
    }
}

/// Errors produced while extracting identifier components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("unable to extract '{component}' using regexp '{pattern}' from the id '{id}'")]
    NoMatch {
        component: IdComponent,
        pattern: &'static str,
        id: String,
    },

    #[error("unknown identifier component '{0}'")]
    UnknownComponent(String),
}

impl IdError {
    pub fn is_no_match(&self) -> bool {
        matches!(self, IdError::NoMatch { .. })
    }
}

/// Applies the component's pattern to `id` and returns the captured text.
pub fn extract(component: IdComponent, id: &str) -> Result<&str, IdError> {
    let re = component.pattern();
    re.captures(id)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| IdError::NoMatch {
            component,
            pattern: re.as_str(),
            id: id.to_string(),
        })
}

/// Every component present in `id`, in [`IdComponent::ALL`] order.
pub fn extract_all(id: &str) -> Vec<(IdComponent, &str)> {
    IdComponent::ALL
        .into_iter()
        .filter_map(|c| extract(c, id).ok().map(|part| (c, part)))
        .collect()
}

pub fn resource_group_name(id: &str) -> Result<&str, IdError> {
    extract(IdComponent::ResourceGroup, id)
}

pub fn subscription_id(id: &str) -> Result<&str, IdError> {
    extract(IdComponent::Subscription, id)
}

pub fn reservation_id(id: &str) -> Result<&str, IdError> {
    extract(IdComponent::Reservation, id)
}

pub fn reservation_order_id(id: &str) -> Result<&str, IdError> {
    extract(IdComponent::ReservationOrder, id)
}

pub fn host_group_name(id: &str) -> Result<&str, IdError> {
    extract(IdComponent::HostGroup, id)
}

pub fn vm_name(id: &str) -> Result<&str, IdError> {
    extract(IdComponent::Vm, id)
}

pub fn sql_server_name(id: &str) -> Result<&str, IdError> {
    extract(IdComponent::SqlServer, id)
}
