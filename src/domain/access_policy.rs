use std::fmt::Display;

use mockall::automock;

use crate::domain::errors::SalesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Sales,
    AdSpends,
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let resource = match self {
            Resource::Sales => "sales",
            Resource::AdSpends => "ad_spends",
        };
        write!(f, "{}", resource)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operation = match self {
            Operation::Select => "select",
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        write!(f, "{}", operation)
    }
}

/// One predicate per operation and store. Every use case asks the policy
/// before it touches a repository.
#[automock]
pub trait AccessPolicy {
    fn can_select(&self, resource: Resource) -> bool;
    fn can_insert(&self, resource: Resource) -> bool;
    fn can_update(&self, resource: Resource) -> bool;
    fn can_delete(&self, resource: Resource) -> bool;
}

/// Permits every operation on both stores.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAccessPolicy;

impl AccessPolicy for OpenAccessPolicy {
    fn can_select(&self, _resource: Resource) -> bool {
        true
    }

    fn can_insert(&self, _resource: Resource) -> bool {
        true
    }

    fn can_update(&self, _resource: Resource) -> bool {
        true
    }

    fn can_delete(&self, _resource: Resource) -> bool {
        true
    }
}

pub fn authorize<P>(policy: &P, resource: Resource, operation: Operation) -> Result<(), SalesError>
where
    P: AccessPolicy + ?Sized,
{
    let allowed = match operation {
        Operation::Select => policy.can_select(resource),
        Operation::Insert => policy.can_insert(resource),
        Operation::Update => policy.can_update(resource),
        Operation::Delete => policy.can_delete(resource),
    };

    if allowed {
        Ok(())
    } else {
        Err(SalesError::Unauthorized {
            resource,
            operation,
        })
    }
}
