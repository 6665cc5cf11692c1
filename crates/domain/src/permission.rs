use std::str::FromStr;

use freightline_core::AppError;
use serde::{Deserialize, Serialize};

/// Atomic capability checked against a role by application policy.
///
/// Permissions are never combined or derived at runtime; the role tables in
/// [`crate::access`] are the only place they are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Allows viewing the load board.
    ViewLoads,
    /// Allows posting new loads.
    CreateLoads,
    /// Allows editing existing loads.
    EditLoads,
    /// Allows deleting loads.
    DeleteLoads,
    /// Allows assigning loads to carriers or drivers.
    AssignLoads,
    /// Allows exporting load data.
    ExportLoads,
    /// Allows viewing the truck board.
    ViewTrucks,
    /// Allows posting new trucks.
    CreateTrucks,
    /// Allows editing existing trucks.
    EditTrucks,
    /// Allows deleting trucks.
    DeleteTrucks,
    /// Allows assigning trucks to loads.
    AssignTrucks,
    /// Allows viewing firm users.
    ViewUsers,
    /// Allows inviting new users to the firm.
    InviteUsers,
    /// Allows editing user accounts.
    ManageUsers,
    /// Allows deleting user accounts and their identities.
    DeleteUsers,
    /// Allows changing another user's role.
    AssignRoles,
    /// Allows triggering password-reset emails for other users.
    ResetUserPasswords,
    /// Allows viewing teams.
    ViewTeams,
    /// Allows creating teams.
    CreateTeams,
    /// Allows editing teams.
    EditTeams,
    /// Allows deleting teams.
    DeleteTeams,
    /// Allows changing team membership.
    ManageTeamMembers,
    /// Allows viewing firm settings.
    ViewFirmSettings,
    /// Allows editing firm settings.
    EditFirmSettings,
    /// Allows managing firm billing.
    ManageBilling,
    /// Allows deleting the firm account.
    DeleteFirm,
    /// Allows viewing RFPs.
    ViewRfps,
    /// Allows importing RFP spreadsheets.
    ImportRfps,
    /// Allows editing RFP rows.
    EditRfps,
    /// Allows deleting RFPs.
    DeleteRfps,
    /// Allows awarding RFP lanes.
    AwardRfps,
    /// Allows viewing the dashboard.
    ViewDashboard,
    /// Allows viewing reports.
    ViewReports,
    /// Allows exporting reports.
    ExportReports,
    /// Allows viewing analytics.
    ViewAnalytics,
    /// Allows viewing invoices.
    ViewInvoices,
    /// Allows creating invoices.
    CreateInvoices,
    /// Allows editing invoices.
    EditInvoices,
    /// Allows deleting invoices.
    DeleteInvoices,
    /// Allows viewing payments.
    ViewPayments,
    /// Allows recording payments.
    RecordPayments,
    /// Allows viewing lane rates.
    ViewRates,
    /// Allows editing lane rates.
    EditRates,
    /// Allows viewing customers.
    ViewCustomers,
    /// Allows creating customers.
    CreateCustomers,
    /// Allows editing customers.
    EditCustomers,
    /// Allows deleting customers.
    DeleteCustomers,
    /// Allows viewing carriers.
    ViewCarriers,
    /// Allows creating carriers.
    CreateCarriers,
    /// Allows editing carriers.
    EditCarriers,
    /// Allows deleting carriers.
    DeleteCarriers,
    /// Allows viewing documents.
    ViewDocuments,
    /// Allows uploading documents.
    UploadDocuments,
    /// Allows deleting documents.
    DeleteDocuments,
    /// Allows viewing the dispatch board.
    ViewDispatchBoard,
    /// Allows assigning drivers to loads.
    AssignDrivers,
    /// Allows updating load transit status.
    UpdateLoadStatus,
    /// Allows viewing sales leads.
    ViewLeads,
    /// Allows creating sales leads.
    CreateLeads,
    /// Allows editing sales leads.
    EditLeads,
    /// Allows viewing marketing campaigns.
    ViewCampaigns,
    /// Allows managing marketing campaigns.
    ManageCampaigns,
    /// Allows managing notification settings.
    ManageNotifications,
    /// Allows viewing the audit log.
    ViewAuditLog,
    /// Allows managing third-party integrations.
    ManageIntegrations,
}

impl Permission {
    /// Returns a stable storage value for this permission.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewLoads => "loads.view",
            Self::CreateLoads => "loads.create",
            Self::EditLoads => "loads.edit",
            Self::DeleteLoads => "loads.delete",
            Self::AssignLoads => "loads.assign",
            Self::ExportLoads => "loads.export",
            Self::ViewTrucks => "trucks.view",
            Self::CreateTrucks => "trucks.create",
            Self::EditTrucks => "trucks.edit",
            Self::DeleteTrucks => "trucks.delete",
            Self::AssignTrucks => "trucks.assign",
            Self::ViewUsers => "users.view",
            Self::InviteUsers => "users.invite",
            Self::ManageUsers => "users.manage",
            Self::DeleteUsers => "users.delete",
            Self::AssignRoles => "users.assign_roles",
            Self::ResetUserPasswords => "users.reset_passwords",
            Self::ViewTeams => "teams.view",
            Self::CreateTeams => "teams.create",
            Self::EditTeams => "teams.edit",
            Self::DeleteTeams => "teams.delete",
            Self::ManageTeamMembers => "teams.manage_members",
            Self::ViewFirmSettings => "firm.view_settings",
            Self::EditFirmSettings => "firm.edit_settings",
            Self::ManageBilling => "firm.manage_billing",
            Self::DeleteFirm => "firm.delete",
            Self::ViewRfps => "rfps.view",
            Self::ImportRfps => "rfps.import",
            Self::EditRfps => "rfps.edit",
            Self::DeleteRfps => "rfps.delete",
            Self::AwardRfps => "rfps.award",
            Self::ViewDashboard => "dashboard.view",
            Self::ViewReports => "reports.view",
            Self::ExportReports => "reports.export",
            Self::ViewAnalytics => "analytics.view",
            Self::ViewInvoices => "invoices.view",
            Self::CreateInvoices => "invoices.create",
            Self::EditInvoices => "invoices.edit",
            Self::DeleteInvoices => "invoices.delete",
            Self::ViewPayments => "payments.view",
            Self::RecordPayments => "payments.record",
            Self::ViewRates => "rates.view",
            Self::EditRates => "rates.edit",
            Self::ViewCustomers => "customers.view",
            Self::CreateCustomers => "customers.create",
            Self::EditCustomers => "customers.edit",
            Self::DeleteCustomers => "customers.delete",
            Self::ViewCarriers => "carriers.view",
            Self::CreateCarriers => "carriers.create",
            Self::EditCarriers => "carriers.edit",
            Self::DeleteCarriers => "carriers.delete",
            Self::ViewDocuments => "documents.view",
            Self::UploadDocuments => "documents.upload",
            Self::DeleteDocuments => "documents.delete",
            Self::ViewDispatchBoard => "dispatch.view_board",
            Self::AssignDrivers => "dispatch.assign_drivers",
            Self::UpdateLoadStatus => "dispatch.update_load_status",
            Self::ViewLeads => "leads.view",
            Self::CreateLeads => "leads.create",
            Self::EditLeads => "leads.edit",
            Self::ViewCampaigns => "campaigns.view",
            Self::ManageCampaigns => "campaigns.manage",
            Self::ManageNotifications => "settings.manage_notifications",
            Self::ViewAuditLog => "audit.view",
            Self::ManageIntegrations => "settings.manage_integrations",
        }
    }

    /// Returns all known permissions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Permission] = &[
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

        ALL
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .find(|permission| permission.as_str() == value)
            .copied()
            .ok_or_else(|| AppError::Validation(format!("unknown permission value '{value}'")))
    }
}
