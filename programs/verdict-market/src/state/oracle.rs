use anchor_lang::prelude::*;
use crate::errors::VerdictError;

/// One resolution protocol instance. Role tables hang off this account.
#[account]
#[derive(Default)]
pub struct OracleConfig {
    pub authority: Pubkey,          // 32
    pub admin_count: u32,           // 4
    pub resolver_count: u32,        // 4
    pub signer_count: u32,          // 4
    pub bump: u8,                   // 1
}

impl OracleConfig {
    pub const LEN: usize = 8 + 32 + 4 * 3 + 1;

    /// Applies a role change requested by `caller`, keeping the per-role counts in step.
    ///
    /// Returns whether the grant actually changed.
    pub fn set_role(
        &mut self,
        caller: Pubkey,
        caller_role: Option<&RoleGrant>,
        grant: &mut RoleGrant,
        role: Role,
        enabled: bool,
    ) -> Result<bool> {
        let authorized = caller_role.map_or(false, |r| r.identity == caller && r.has(Role::Admin));
        require!(authorized, VerdictError::Unauthorized);

        if grant.has(role) == enabled {
            return Ok(false);
        }
        if role == Role::Admin && !enabled {
            require!(self.admin_count > 1, VerdictError::LastAdmin);
        }

        let counter = match role {
            Role::Admin => &mut self.admin_count,
            Role::Resolver => &mut self.resolver_count,
            Role::Signer => &mut self.signer_count,
        };
        *counter = if enabled {
            counter.checked_add(1).ok_or(VerdictError::MathOverflow)?
        } else {
            counter.checked_sub(1).ok_or(VerdictError::MathOverflow)?
        };
        grant.set(role, enabled);
        Ok(true)
    }
}

/// Capability flags of one identity within one oracle.
#[account]
#[derive(Default)]
pub struct RoleGrant {
    pub oracle: Pubkey,
    pub identity: Pubkey,
    pub is_admin: bool,
    pub is_resolver: bool,
    pub is_signer: bool,
    pub bump: u8,
}

impl RoleGrant {
    pub const LEN: usize = 8 + 32 + 32 + 1 + 1 + 1 + 1;

    /// Reads a grant from a PDA that may not exist yet.
    pub fn load(info: &AccountInfo) -> Option<RoleGrant> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return None;
        }
        let data = info.try_borrow_data().ok()?;
        RoleGrant::try_deserialize(&mut &data[..]).ok()
    }

    pub fn has(&self, role: Role) -> bool {
        match role {
            Role::Admin => self.is_admin,
            Role::Resolver => self.is_resolver,
            Role::Signer => self.is_signer,
        }
    }

    pub fn set(&mut self, role: Role, enabled: bool) {
        match role {
            Role::Admin => self.is_admin = enabled,
            Role::Resolver => self.is_resolver = enabled,
            Role::Signer => self.is_signer = enabled,
        }
    }

    /// Resolvers vote; admins may stand in for them.
    pub fn can_vote(&self) -> bool {
        self.is_resolver || self.is_admin
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum Role {
    Admin,
    Resolver,
    Signer,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_grant(oracle: Pubkey, identity: Pubkey) -> RoleGrant {
        RoleGrant { oracle, identity, is_admin: true, is_resolver: true, ..Default::default() }
    }

    #[test]
    fn admin_grants_resolver_role() {
        let oracle = Pubkey::new_unique();
        let admin = Pubkey::new_unique();
        let mut config = OracleConfig { authority: admin, admin_count: 1, resolver_count: 1, ..Default::default() };
        let caller = admin_grant(oracle, admin);
        let mut target = RoleGrant { oracle, identity: Pubkey::new_unique(), ..Default::default() };

        let changed = config.set_role(admin, Some(&caller), &mut target, Role::Resolver, true).unwrap();
        assert!(changed);
        assert!(target.can_vote());
        assert_eq!(config.resolver_count, 2);

        // re-asserting is a no-op
        let changed = config.set_role(admin, Some(&caller), &mut target, Role::Resolver, true).unwrap();
        assert!(!changed);
        assert_eq!(config.resolver_count, 2);
    }

    #[test]
    fn non_admin_cannot_change_roles() {
        let oracle = Pubkey::new_unique();
        let resolver = Pubkey::new_unique();
        let mut config = OracleConfig { admin_count: 1, ..Default::default() };
        let caller = RoleGrant { oracle, identity: resolver, is_resolver: true, ..Default::default() };
        let mut target = RoleGrant::default();

        let err = config.set_role(resolver, Some(&caller), &mut target, Role::Admin, true).unwrap_err();
        assert_eq!(err, VerdictError::Unauthorized.into());
        let err = config.set_role(resolver, None, &mut target, Role::Admin, true).unwrap_err();
        assert_eq!(err, VerdictError::Unauthorized.into());
        assert!(!target.is_admin);
    }

    #[test]
    fn last_admin_is_kept() {
        let oracle = Pubkey::new_unique();
        let admin = Pubkey::new_unique();
        let mut config = OracleConfig { admin_count: 1, ..Default::default() };
        let caller = admin_grant(oracle, admin);
        let mut own = admin_grant(oracle, admin);

        let err = config.set_role(admin, Some(&caller), &mut own, Role::Admin, false).unwrap_err();
        assert_eq!(err, VerdictError::LastAdmin.into());
        assert!(own.is_admin);
        assert_eq!(config.admin_count, 1);
    }

    #[test]
    fn signer_role_does_not_vote() {
        let grant = RoleGrant { is_signer: true, ..Default::default() };
        assert!(grant.has(Role::Signer));
        assert!(!grant.can_vote());
    }
}
