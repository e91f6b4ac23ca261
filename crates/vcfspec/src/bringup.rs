//! Cloud Builder bring-up spec
//!
//! The document Cloud Builder accepts under "Bring-up → Upload JSON". Field order here is the key order of the
//! generated JSON. Optional sections are left out entirely when they are `None`.
use crate::value::{Number, Value};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BringupSpec {
    pub sddc_id: String,
    pub vcf_instance_name: String,
    pub workflow_type: String,
    pub version: String,
    pub ceip_enabled: bool,
    pub dns_spec: DnsSpec,
    pub ntp_servers: Vec<Value>,
    pub vcenter_spec: VcenterSpec,
    pub cluster_spec: ClusterSpec,
    pub datastore_spec: DatastoreSpec,
    pub nsxt_spec: NsxtSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_specs: Option<Vec<HostSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_specs: Option<Vec<NetworkSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dvs_specs: Option<Vec<DvsSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcf_automation_spec: Option<VcfAutomationSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcf_operations_spec: Option<VcfOperationsSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcf_operations_collector_spec: Option<VcfOperationsCollectorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcf_operations_fleet_management_spec: Option<VcfOperationsFleetManagementSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sddc_manager_spec: Option<SddcManagerSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DnsSpec {
    pub nameservers: Vec<String>,
    pub subdomain: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VcenterSpec {
    pub vcenter_hostname: String,
    pub root_vcenter_password: String,
    pub vm_size: String,
    pub storage_size: String,
    pub admin_user_sso_password: String,
    pub sso_domain: String,
    pub use_existing_deployment: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    pub cluster_name: String,
    pub datacenter_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatastoreSpec {
    pub vsan_spec: VsanSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VsanSpec {
    pub failures_to_tolerate: Number,
    pub vsan_dedup: bool,
    pub esa_config: EsaConfig,
    pub datastore_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EsaConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NsxtSpec {
    pub nsxt_manager_size: String,
    pub nsxt_managers: Vec<NsxtManager>,
    pub vip_fqdn: String,
    pub use_existing_deployment: bool,
    pub nsxt_admin_password: String,
    pub nsxt_audit_password: String,
    pub root_nsxt_manager_password: String,
    pub skip_nsx_overlay_over_management_network: bool,
    pub transport_vlan_id: Number,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address_pool_spec: Option<IpAddressPoolSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NsxtManager {
    pub hostname: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpAddressPoolSpec {
    pub name: String,
    pub description: String,
    pub subnets: Vec<IpAddressPoolSubnet>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAddressPoolSubnet {
    pub cidr: String,
    pub gateway: String,
    pub ip_address_pool_ranges: Vec<IpAddressPoolRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpAddressPoolRange {
    pub start: String,
    pub end: String,
}

/// ESXi host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSpec {
    pub hostname: String,
    pub credentials: Credentials,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_thumbprint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSpec {
    pub network_type: String,
    pub subnet: String,
    pub gateway: String,
    pub subnet_mask: String,
    /// Cloud Builder wants the VLAN id as a string
    pub vlan_id: String,
    pub mtu: Number,
    pub teaming_policy: String,
    pub active_uplinks: Vec<Value>,
    pub standby_uplinks: Vec<Value>,
    pub port_group_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_ip_address_ranges: Option<Vec<IpAddressRange>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAddressRange {
    pub start_ip_address: String,
    pub end_ip_address: String,
}

/// Distributed switch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DvsSpec {
    pub dvs_name: String,
    pub networks: Vec<Value>,
    pub mtu: Number,
    pub vmnics_to_uplinks: Vec<VmnicToUplink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsxt_switch_config: Option<NsxtSwitchConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsx_teamings: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VmnicToUplink {
    pub id: String,
    pub uplink: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NsxtSwitchConfig {
    pub transport_zones: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VcfAutomationSpec {
    pub hostname: String,
    pub admin_user_password: String,
    pub ip_pool: Vec<Value>,
    pub node_prefix: String,
    pub internal_cluster_cidr: String,
    pub use_existing_deployment: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VcfOperationsSpec {
    pub nodes: Vec<OperationsNode>,
    pub admin_user_password: String,
    pub appliance_size: String,
    pub use_existing_deployment: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer_fqdn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsNode {
    pub hostname: String,
    pub root_user_password: String,
    #[serde(rename = "type")]
    pub node_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VcfOperationsCollectorSpec {
    pub application_size: String,
    pub hostname: String,
    pub appliance_size: String,
    pub root_user_password: String,
    pub use_existing_deployment: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VcfOperationsFleetManagementSpec {
    pub hostname: String,
    pub root_user_password: String,
    pub admin_user_password: String,
    pub use_existing_deployment: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SddcManagerSpec {
    pub hostname: String,
    pub use_existing_deployment: bool,
    pub root_password: String,
    pub ssh_password: String,
    pub local_user_password: String,
}

/// What ended up in a spec, for progress output
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub hosts: usize,
    pub networks: usize,
    pub switches: usize,
    pub nsx_managers: usize,
    /// Names of the enabled appliance sections
    pub appliances: Vec<&'static str>,
}

impl BringupSpec {
    pub fn summary(&self) -> Summary {
        let mut appliances = vec![];
        if self.vcf_automation_spec.is_some() {
            appliances.push("VCF Automation");
        }
        if self.vcf_operations_spec.is_some() {
            appliances.push("VCF Operations");
        }
        if self.vcf_operations_collector_spec.is_some() {
            appliances.push("VCF Operations Collector");
        }
        if self.vcf_operations_fleet_management_spec.is_some() {
            appliances.push("Fleet Manager");
        }
        if self.sddc_manager_spec.is_some() {
            appliances.push("SDDC Manager");
        }

        Summary {
            hosts: self.host_specs.as_ref().map_or(0, Vec::len),
            networks: self.network_specs.as_ref().map_or(0, Vec::len),
            switches: self.dvs_specs.as_ref().map_or(0, Vec::len),
            nsx_managers: self.nsxt_spec.nsxt_managers.len(),
            appliances,
        }
    }
}
