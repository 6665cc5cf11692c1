//! Role-based access control: the authored role→permission table and the
//! pure queries every call site must resolve through.
//!
//! The table is a business rule, not derived data. Each entry is authored
//! explicitly; the map is total over [`Role::all`] and
//! `ORGANIZATION_OWNER`'s entry is a superset of every other entry (asserted
//! by test).

use crate::{Permission, Role};

const OWNER_PERMISSIONS: &[Permission] = &[
    Permission::ViewLoads,
    Permission::CreateLoads,
    Permission::EditLoads,
    Permission::DeleteLoads,
    Permission::AssignLoads,
    Permission::ExportLoads,
    Permission::ViewTrucks,
    Permission::CreateTrucks,
    Permission::EditTrucks,
    Permission::DeleteTrucks,
    Permission::AssignTrucks,
    Permission::ViewUsers,
    Permission::InviteUsers,
    Permission::ManageUsers,
    Permission::DeleteUsers,
    Permission::AssignRoles,
    Permission::ResetUserPasswords,
    Permission::ViewTeams,
    Permission::CreateTeams,
    Permission::EditTeams,
    Permission::DeleteTeams,
    Permission::ManageTeamMembers,
    Permission::ViewFirmSettings,
    Permission::EditFirmSettings,
    Permission::ManageBilling,
    Permission::DeleteFirm,
    Permission::ViewRfps,
    Permission::ImportRfps,
    Permission::EditRfps,
    Permission::DeleteRfps,
    Permission::AwardRfps,
    Permission::ViewDashboard,
    Permission::ViewReports,
    Permission::ExportReports,
    Permission::ViewAnalytics,
    Permission::ViewInvoices,
    Permission::CreateInvoices,
    Permission::EditInvoices,
    Permission::DeleteInvoices,
    Permission::ViewPayments,
    Permission::RecordPayments,
    Permission::ViewRates,
    Permission::EditRates,
    Permission::ViewCustomers,
    Permission::CreateCustomers,
    Permission::EditCustomers,
    Permission::DeleteCustomers,
    Permission::ViewCarriers,
    Permission::CreateCarriers,
    Permission::EditCarriers,
    Permission::DeleteCarriers,
    Permission::ViewDocuments,
    Permission::UploadDocuments,
    Permission::DeleteDocuments,
    Permission::ViewDispatchBoard,
    Permission::AssignDrivers,
    Permission::UpdateLoadStatus,
    Permission::ViewLeads,
    Permission::CreateLeads,
    Permission::EditLeads,
    Permission::ViewCampaigns,
    Permission::ManageCampaigns,
    Permission::ManageNotifications,
    Permission::ViewAuditLog,
    Permission::ManageIntegrations,
];

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::ViewLoads,
    Permission::CreateLoads,
    Permission::EditLoads,
    Permission::DeleteLoads,
    Permission::AssignLoads,
    Permission::ExportLoads,
    Permission::ViewTrucks,
    Permission::CreateTrucks,
    Permission::EditTrucks,
    Permission::DeleteTrucks,
    Permission::AssignTrucks,
    Permission::ViewUsers,
    Permission::InviteUsers,
    Permission::ManageUsers,
    Permission::DeleteUsers,
    Permission::AssignRoles,
    Permission::ResetUserPasswords,
    Permission::ViewTeams,
    Permission::CreateTeams,
    Permission::EditTeams,
    Permission::DeleteTeams,
    Permission::ManageTeamMembers,
    Permission::ViewFirmSettings,
    Permission::EditFirmSettings,
    Permission::ManageBilling,
    Permission::ViewRfps,
    Permission::ImportRfps,
    Permission::EditRfps,
    Permission::DeleteRfps,
    Permission::AwardRfps,
    Permission::ViewDashboard,
    Permission::ViewReports,
    Permission::ExportReports,
    Permission::ViewAnalytics,
    Permission::ViewInvoices,
    Permission::CreateInvoices,
    Permission::EditInvoices,
    Permission::DeleteInvoices,
    Permission::ViewPayments,
    Permission::RecordPayments,
    Permission::ViewRates,
    Permission::EditRates,
    Permission::ViewCustomers,
    Permission::CreateCustomers,
    Permission::EditCustomers,
    Permission::DeleteCustomers,
    Permission::ViewCarriers,
    Permission::CreateCarriers,
    Permission::EditCarriers,
    Permission::DeleteCarriers,
    Permission::ViewDocuments,
    Permission::UploadDocuments,
    Permission::DeleteDocuments,
    Permission::ViewDispatchBoard,
    Permission::AssignDrivers,
    Permission::UpdateLoadStatus,
    Permission::ViewLeads,
    Permission::CreateLeads,
    Permission::EditLeads,
    Permission::ViewCampaigns,
    Permission::ManageCampaigns,
    Permission::ManageNotifications,
    Permission::ViewAuditLog,
    Permission::ManageIntegrations,
];

const OPERATION_MANAGER_PERMISSIONS: &[Permission] = &[
    Permission::ViewLoads,
    Permission::CreateLoads,
    Permission::EditLoads,
    Permission::DeleteLoads,
    Permission::AssignLoads,
    Permission::ExportLoads,
    Permission::ViewTrucks,
    Permission::CreateTrucks,
    Permission::EditTrucks,
    Permission::DeleteTrucks,
    Permission::AssignTrucks,
    Permission::ViewUsers,
    Permission::InviteUsers,
    Permission::ViewTeams,
    Permission::ManageTeamMembers,
    Permission::ViewRfps,
    Permission::ImportRfps,
    Permission::EditRfps,
    Permission::AwardRfps,
    Permission::ViewDashboard,
    Permission::ViewReports,
    Permission::ExportReports,
    Permission::ViewAnalytics,
    Permission::ViewRates,
    Permission::ViewCustomers,
    Permission::CreateCustomers,
    Permission::EditCustomers,
    Permission::ViewCarriers,
    Permission::CreateCarriers,
    Permission::EditCarriers,
    Permission::ViewDocuments,
    Permission::UploadDocuments,
    Permission::DeleteDocuments,
    Permission::ViewDispatchBoard,
    Permission::AssignDrivers,
    Permission::UpdateLoadStatus,
    Permission::ViewAuditLog,
];

const BROKER_PERMISSIONS: &[Permission] = &[
    Permission::ViewLoads,
    Permission::CreateLoads,
    Permission::EditLoads,
    Permission::AssignLoads,
    Permission::ExportLoads,
    Permission::ViewTrucks,
    Permission::ViewRfps,
    Permission::ViewDashboard,
    Permission::ViewRates,
    Permission::ViewCustomers,
    Permission::CreateCustomers,
    Permission::EditCustomers,
    Permission::ViewCarriers,
    Permission::ViewDocuments,
    Permission::UploadDocuments,
    Permission::ViewLeads,
];

const DISPATCHER_PERMISSIONS: &[Permission] = &[
    Permission::ViewLoads,
    Permission::ViewTrucks,
    Permission::CreateTrucks,
    Permission::EditTrucks,
    Permission::AssignTrucks,
    Permission::ViewDashboard,
    Permission::ViewCarriers,
    Permission::ViewDocuments,
    Permission::UploadDocuments,
    Permission::ViewDispatchBoard,
    Permission::AssignDrivers,
    Permission::UpdateLoadStatus,
];

const DRIVER_PERMISSIONS: &[Permission] = &[
    Permission::ViewLoads,
    Permission::ViewTrucks,
    Permission::ViewDocuments,
    Permission::UploadDocuments,
    Permission::UpdateLoadStatus,
];

const ACCOUNTING_PERMISSIONS: &[Permission] = &[
    Permission::ViewLoads,
    Permission::ViewDashboard,
    Permission::ViewReports,
    Permission::ExportReports,
    Permission::ViewInvoices,
    Permission::CreateInvoices,
    Permission::EditInvoices,
    Permission::ViewPayments,
    Permission::RecordPayments,
    Permission::ViewRates,
    Permission::EditRates,
    Permission::ViewCustomers,
    Permission::ViewCarriers,
    Permission::ViewDocuments,
];

const SALES_PERMISSIONS: &[Permission] = &[
    Permission::ViewLoads,
    Permission::ViewRfps,
    Permission::ViewDashboard,
    Permission::ViewReports,
    Permission::ViewRates,
    Permission::ViewCustomers,
    Permission::CreateCustomers,
    Permission::EditCustomers,
    Permission::ViewLeads,
    Permission::CreateLeads,
    Permission::EditLeads,
    Permission::ViewCampaigns,
];

const MARKETING_PERMISSIONS: &[Permission] = &[
    Permission::ViewDashboard,
    Permission::ViewReports,
    Permission::ViewCustomers,
    Permission::ViewLeads,
    Permission::CreateLeads,
    Permission::ViewCampaigns,
    Permission::ManageCampaigns,
];

const CUSTOMER_PERMISSIONS: &[Permission] = &[
    Permission::ViewLoads,
    Permission::ViewDashboard,
    Permission::ViewInvoices,
    Permission::ViewDocuments,
    Permission::UploadDocuments,
];

const READ_ONLY_PERMISSIONS: &[Permission] = &[
    Permission::ViewLoads,
    Permission::ViewTrucks,
    Permission::ViewTeams,
    Permission::ViewRfps,
    Permission::ViewDashboard,
    Permission::ViewReports,
    Permission::ViewCustomers,
    Permission::ViewCarriers,
    Permission::ViewDocuments,
];

/// Returns the authored permission set for a role.
///
/// Total over [`Role::all`]; every entry is non-empty.
#[must_use]
pub fn role_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::OrganizationOwner => OWNER_PERMISSIONS,
        Role::Admin => ADMIN_PERMISSIONS,
        Role::OperationManager => OPERATION_MANAGER_PERMISSIONS,
        Role::Broker => BROKER_PERMISSIONS,
        Role::Dispatcher => DISPATCHER_PERMISSIONS,
        Role::Driver => DRIVER_PERMISSIONS,
        Role::Accounting => ACCOUNTING_PERMISSIONS,
        Role::Sales => SALES_PERMISSIONS,
        Role::Marketing => MARKETING_PERMISSIONS,
        Role::Customer => CUSTOMER_PERMISSIONS,
        Role::ReadOnly => READ_ONLY_PERMISSIONS,
    }
}

/// Returns whether the role holds the permission.
///
/// `None` (no resolved role) never holds anything; this function never
/// panics and never errors.
#[must_use]
pub fn has_permission(role: Option<Role>, permission: Permission) -> bool {
    role.map(|role| role_permissions(role).contains(&permission))
        .unwrap_or(false)
}

/// Returns whether the role holds at least one of the permissions.
#[must_use]
pub fn has_any_permission(role: Option<Role>, permissions: &[Permission]) -> bool {
    permissions
        .iter()
        .any(|permission| has_permission(role, *permission))
}

/// Returns whether the role holds every listed permission.
///
/// Vacuously true for a known role and an empty list; callers treat an
/// empty requirement list as "no restriction". An unresolved role is false
/// even for the empty list (preserved legacy behaviour).
#[must_use]
pub fn has_all_permissions(role: Option<Role>, permissions: &[Permission]) -> bool {
    if role.is_none() {
        return false;
    }

    permissions
        .iter()
        .all(|permission| has_permission(role, *permission))
}

/// Returns whether the role is a firm-wide administrator.
#[must_use]
pub fn is_admin(role: Option<Role>) -> bool {
    matches!(role, Some(Role::OrganizationOwner | Role::Admin))
}

/// Returns whether the role belongs to operations staff.
#[must_use]
pub fn is_operations_staff(role: Option<Role>) -> bool {
    matches!(
        role,
        Some(Role::OrganizationOwner | Role::Admin | Role::OperationManager | Role::Dispatcher)
    )
}

/// Returns whether the role may manage user accounts.
#[must_use]
pub fn can_manage_users(role: Option<Role>) -> bool {
    has_permission(role, Permission::ManageUsers)
}

/// Returns whether `assigner` may assign `target` to another user.
///
/// A role may assign itself or any less-privileged role, never a
/// more-privileged one.
#[must_use]
pub fn can_assign_role(assigner: Role, target: Role) -> bool {
    assigner.level() <= target.level()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::{Permission, Role};

    use super::{
        can_assign_role, can_manage_users, has_all_permissions, has_any_permission, has_permission,
        is_admin, is_operations_staff, role_permissions,
    };

    #[test]
    fn map_is_total_with_non_empty_entries() {
        for role in Role::all() {
            assert!(
                !role_permissions(*role).is_empty(),
                "role {} has an empty entry",
                role.as_str()
            );
        }
    }

    #[test]
    fn entries_contain_no_duplicates() {
        for role in Role::all() {
            let entry = role_permissions(*role);
            let unique: HashSet<Permission> = entry.iter().copied().collect();
            assert_eq!(unique.len(), entry.len(), "role {}", role.as_str());
        }
    }

    #[test]
    fn owner_entry_is_a_superset_of_every_role() {
        let owner: HashSet<Permission> = role_permissions(Role::OrganizationOwner)
            .iter()
            .copied()
            .collect();

        for role in Role::all() {
            for permission in role_permissions(*role) {
                assert!(
                    owner.contains(permission),
                    "owner is missing '{}' held by {}",
                    permission.as_str(),
                    role.as_str()
                );
            }
        }
    }

    #[test]
    fn owner_holds_every_authored_permission() {
        assert_eq!(
            role_permissions(Role::OrganizationOwner).len(),
            Permission::all().len()
        );
    }

    #[test]
    fn has_permission_matches_the_authored_table() {
        for role in Role::all() {
            let entry: HashSet<Permission> = role_permissions(*role).iter().copied().collect();
            for permission in Permission::all() {
                assert_eq!(
                    has_permission(Some(*role), *permission),
                    entry.contains(permission),
                    "role {} permission {}",
                    role.as_str(),
                    permission.as_str()
                );
            }
        }
    }

    #[test]
    fn unresolved_role_holds_nothing() {
        for permission in Permission::all() {
            assert!(!has_permission(None, *permission));
        }
    }

    #[test]
    fn broker_may_create_loads_but_driver_may_not() {
        assert!(has_permission(Some(Role::Broker), Permission::CreateLoads));
        assert!(!has_permission(Some(Role::Driver), Permission::CreateLoads));
    }

    #[test]
    fn any_permission_needs_just_one_match() {
        let wanted = [Permission::DeleteFirm, Permission::ViewLoads];
        assert!(has_any_permission(Some(Role::Driver), &wanted));
        assert!(!has_any_permission(Some(Role::Marketing), &wanted));
    }

    #[test]
    fn empty_requirement_list_is_vacuously_true_for_known_roles() {
        for role in Role::all() {
            assert!(has_all_permissions(Some(*role), &[]));
        }
    }

    #[test]
    fn empty_requirement_list_is_false_for_unresolved_role() {
        assert!(!has_all_permissions(None, &[]));
    }

    #[test]
    fn all_permissions_requires_every_entry() {
        let wanted = [Permission::ViewLoads, Permission::CreateLoads];
        assert!(has_all_permissions(Some(Role::Broker), &wanted));
        assert!(!has_all_permissions(Some(Role::Driver), &wanted));
    }

    #[test]
    fn admin_predicate_covers_the_fixed_role_set() {
        assert!(is_admin(Some(Role::OrganizationOwner)));
        assert!(is_admin(Some(Role::Admin)));
        assert!(!is_admin(Some(Role::OperationManager)));
        assert!(!is_admin(None));
    }

    #[test]
    fn operations_staff_predicate_covers_the_fixed_role_set() {
        assert!(is_operations_staff(Some(Role::OperationManager)));
        assert!(is_operations_staff(Some(Role::Dispatcher)));
        assert!(!is_operations_staff(Some(Role::Broker)));
        assert!(!is_operations_staff(None));
    }

    #[test]
    fn manage_users_follows_the_permission_table() {
        assert!(can_manage_users(Some(Role::Admin)));
        assert!(!can_manage_users(Some(Role::Broker)));
        assert!(!can_manage_users(None));
    }

    #[test]
    fn role_assignment_is_reflexive() {
        for role in Role::all() {
            assert!(can_assign_role(*role, *role));
        }
    }

    #[test]
    fn owner_assigns_every_role_and_read_only_assigns_only_itself() {
        for role in Role::all() {
            assert!(can_assign_role(Role::OrganizationOwner, *role));
            if *role != Role::ReadOnly {
                assert!(!can_assign_role(Role::ReadOnly, *role));
            }
        }
    }

    #[test]
    fn less_privileged_roles_cannot_assign_upwards() {
        assert!(!can_assign_role(Role::Broker, Role::Admin));
        assert!(!can_assign_role(Role::Dispatcher, Role::OperationManager));
        assert!(can_assign_role(Role::Admin, Role::Broker));
    }
}
