//! fallback values for the bring-up spec
//!
//! Every field of the generated spec that is not fixed has a default here. The built-in values match what the
//! Cloud Builder lab templates expect. A YAML (or JSON) file can override any subset of them:
//!
//! ```yaml
//! instance_id: lab01
//! password: Secret123!
//! ntp_servers: [10.0.0.1, 10.0.0.2]
//! ```
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub instance_id: String,
    pub version: String,
    pub ceip_enabled: bool,
    pub dns_nameserver: String,
    pub dns_domain: String,
    pub ntp_servers: Vec<String>,

    /// Placeholder for every password that is not set explicitly
    pub password: String,

    pub vcenter_hostname: String,
    pub vcenter_vm_size: String,
    pub vcenter_storage_size: String,
    pub sso_domain: String,

    pub cluster_name: String,
    pub datacenter_name: String,

    pub vsan_failures_to_tolerate: i64,
    pub vsan_dedup: bool,
    pub vsan_esa: bool,
    pub vsan_datastore_name: String,

    pub nsx_manager_size: String,
    pub nsx_manager_hostname: String,
    pub nsx_vip_fqdn: String,
    pub nsx_transport_vlan_id: i64,
    pub nsx_ip_pool_name: String,
    pub nsx_ip_pool_description: String,

    pub esxi_username: String,

    pub network_vlan_id: String,
    pub network_mtu: i64,
    pub network_teaming_policy: String,
    pub network_active_uplinks: Vec<String>,

    pub dvs_mtu: i64,

    pub automation_hostname: String,
    pub automation_node_prefix: String,
    pub automation_internal_cluster_cidr: String,

    pub operations_hostname: String,
    pub operations_appliance_size: String,
    pub operations_collector_hostname: String,
    pub operations_collector_appliance_size: String,

    pub fleet_manager_hostname: String,
    pub sddc_manager_hostname: String,

    /// Cloud Builder appliance the spec gets uploaded to
    pub installer_host: String,
}

impl Default for Defaults {
    fn default() -> Self {
        let password = "VMware123!".to_string();
        Self {
            instance_id: "vcf".into(),
            version: "9.0.1.0".into(),
            ceip_enabled: true,
            dns_nameserver: "10.1.1.1".into(),
            dns_domain: "vcf.lab".into(),
            ntp_servers: vec!["10.1.1.1".into()],
            password,
            vcenter_hostname: "vcenter.vcf.lab".into(),
            vcenter_vm_size: "medium".into(),
            vcenter_storage_size: "lstorage".into(),
            sso_domain: "vsphere.local".into(),
            cluster_name: "mgmt-cluster".into(),
            datacenter_name: "mgmt-datacenter".into(),
            vsan_failures_to_tolerate: 1,
            vsan_dedup: true,
            vsan_esa: false,
            vsan_datastore_name: "vsan-datastore".into(),
            nsx_manager_size: "medium".into(),
            nsx_manager_hostname: "nsx-mgmt-01".into(),
            nsx_vip_fqdn: "nsx-vip.vcf.lab".into(),
            nsx_transport_vlan_id: 18,
            nsx_ip_pool_name: "tep-pool".into(),
            nsx_ip_pool_description: "NSX TEP IP Pool".into(),
            esxi_username: "root".into(),
            network_vlan_id: "0".into(),
            network_mtu: 1500,
            network_teaming_policy: "loadbalance_loadbased".into(),
            network_active_uplinks: vec!["uplink1".into(), "uplink2".into()],
            dvs_mtu: 9000,
            automation_hostname: "vcf-automation.vcf.lab".into(),
            automation_node_prefix: "vcfa-appliance".into(),
            automation_internal_cluster_cidr: "198.18.0.0/15".into(),
            operations_hostname: "vcf-ops.vcf.lab".into(),
            operations_appliance_size: "medium".into(),
            operations_collector_hostname: "vcf-ops-collector.vcf.lab".into(),
            operations_collector_appliance_size: "small".into(),
            fleet_manager_hostname: "fleet-manager.vcf.lab".into(),
            sddc_manager_hostname: "sddc-manager.vcf.lab".into(),
            installer_host: "10.1.1.191".into(),
        }
    }
}

impl Defaults {
    /// Load overrides from a YAML or JSON file, unset fields keep the built-in value
    pub fn load_file(file_path: &Path) -> Result<Self, LoadError> {
        tracing::info!(path=%file_path.display(), "loading defaults");

        let file_contents = std::fs::read_to_string(file_path)?;
        Self::from_yaml(&file_contents)
    }

    pub fn from_yaml(text: &str) -> Result<Self, LoadError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(text)?)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Unable to parse defaults file")]
    ParseFailed(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_override() {
        let defaults = Defaults::from_yaml("instance_id: lab01\nnetwork_mtu: 9000").unwrap();

        assert_eq!(defaults.instance_id, "lab01");
        assert_eq!(defaults.network_mtu, 9000);
        assert_eq!(defaults.password, "VMware123!");
        assert_eq!(defaults.dvs_mtu, 9000);
    }

    #[test]
    fn json_is_accepted() {
        let defaults = Defaults::from_yaml(r#"{"ntp_servers": ["10.0.0.1", "10.0.0.2"]}"#).unwrap();
        assert_eq!(defaults.ntp_servers, ["10.0.0.1", "10.0.0.2"]);
    }

    #[test]
    fn empty_file_means_builtin() {
        assert_eq!(Defaults::from_yaml("  \n").unwrap(), Defaults::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = Defaults::from_yaml("instance: lab01").unwrap_err();
        assert!(matches!(error, LoadError::ParseFailed(_)));
    }

    #[test]
    fn missing_file() {
        let error = Defaults::load_file(Path::new("/does/not/exist.yaml")).unwrap_err();
        assert!(matches!(error, LoadError::IoError(_)));
    }
}
