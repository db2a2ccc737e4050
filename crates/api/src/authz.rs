//! API-side authorization guard.
//!
//! This enforces capability checks at the route boundary (before the service
//! layer runs), keeping the service and storage auth-agnostic.

use catalogd_auth::{authorize, AuthzError, Permission, Principal, Role};

use crate::context::PrincipalContext;

/// Check a required permission in the current request context.
///
/// Anonymous callers hold no permissions and are rejected outright.
pub fn require_permission(
    principal: Option<&PrincipalContext>,
    required: &Permission,
) -> Result<(), AuthzError> {
    let Some(ctx) = principal else {
        return Err(AuthzError::Forbidden(required.as_str().to_string()));
    };

    let principal = Principal {
        principal_id: ctx.principal_id(),
        roles: ctx.roles().to_vec(),
        permissions: permissions_from_roles(ctx.roles()),
    };

    authorize(&principal, required)
}

/// Minimal role→permission mapping.
///
/// Convention: "admin" grants all permissions; every other role grants none.
fn permissions_from_roles(roles: &[Role]) -> Vec<Permission> {
    if roles.iter().any(|r| r.as_str() == "admin") {
        return vec![Permission::new("*")];
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogd_auth::PrincipalId;

    fn ctx(roles: &[&'static str]) -> PrincipalContext {
        PrincipalContext::new(
            PrincipalId::new(),
            roles.iter().map(|r| Role::new(*r)).collect(),
        )
    }

    #[test]
    fn admin_can_write() {
        let ctx = ctx(&["admin"]);
        assert!(require_permission(Some(&ctx), &Permission::new("products.create")).is_ok());
    }

    #[test]
    fn plain_user_cannot_write() {
        let ctx = ctx(&["user"]);
        assert!(require_permission(Some(&ctx), &Permission::new("products.create")).is_err());
    }

    #[test]
    fn anonymous_cannot_write() {
        assert!(require_permission(None, &Permission::new("products.delete")).is_err());
    }
}
