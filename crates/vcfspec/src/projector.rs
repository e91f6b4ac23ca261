//! [Variables] → [BringupSpec]
//!
//! Projection is total: every field has a default and a variable of the wrong shape is treated as if it was not
//! set. Inventory sections (`hostSpecs`, `networkSpecs`, `dvsSpecs`) only appear for non-empty lists, appliance
//! sections only when their `*_enabled` flag is `true`.
use crate::bringup::*;
use crate::defaults::Defaults;
use crate::value::{Object, Value};
use crate::variables::{Lookup, Variables};

/// Project with the built-in [Defaults]
pub fn project(variables: &Variables) -> BringupSpec {
    Projector::new(&Defaults::default()).project(variables)
}

#[derive(derive_new::new, Debug)]
pub struct Projector<'d> {
    defaults: &'d Defaults,
}

impl Projector<'_> {
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn project(&self, vars: &Variables) -> BringupSpec {
        let d = self.defaults;
        let instance_id = vars.field("instance_id").string_or(&d.instance_id);

        BringupSpec {
            sddc_id: instance_id.clone(),
            vcf_instance_name: instance_id,
            workflow_type: "VCF".into(),
            version: vars.field("vcf_version").string_or(&d.version),
            ceip_enabled: vars.field("ceip_enabled").bool_or(d.ceip_enabled),
            dns_spec: DnsSpec {
                nameservers: vec![vars.field("dns_nameserver").string_or(&d.dns_nameserver)],
                subdomain: vars.field("dns_domain").string_or(&d.dns_domain),
            },
            ntp_servers: vars.field("ntp_servers").list_or(&d.ntp_servers),
            vcenter_spec: self.vcenter_spec(vars),
            cluster_spec: ClusterSpec {
                cluster_name: vars.field("mgmt_cluster_name").string_or(&d.cluster_name),
                datacenter_name: vars
                    .field("mgmt_datacenter_name")
                    .string_or(&d.datacenter_name),
            },
            datastore_spec: self.datastore_spec(vars),
            nsxt_spec: self.nsxt_spec(vars),
            host_specs: self.host_specs(vars),
            network_specs: self.network_specs(vars),
            dvs_specs: self.dvs_specs(vars),
            vcf_automation_spec: self.vcf_automation_spec(vars),
            vcf_operations_spec: self.vcf_operations_spec(vars),
            vcf_operations_collector_spec: self.vcf_operations_collector_spec(vars),
            vcf_operations_fleet_management_spec: self.vcf_operations_fleet_management_spec(vars),
            sddc_manager_spec: self.sddc_manager_spec(vars),
        }
    }

    /// Cloud Builder web UI the generated spec is uploaded to
    pub fn upload_url(&self, vars: &Variables) -> String {
        let host = vars
            .field("installer_host")
            .string_or(&self.defaults.installer_host);
        format!("https://{host}/")
    }

    fn password(&self, vars: &impl Lookup, key: &str) -> String {
        vars.field(key).string_or(&self.defaults.password)
    }

    fn vcenter_spec(&self, vars: &Variables) -> VcenterSpec {
        let d = self.defaults;
        VcenterSpec {
            vcenter_hostname: vars
                .field("mgmt_vcenter_hostname")
                .string_or(&d.vcenter_hostname),
            root_vcenter_password: self.password(vars, "mgmt_vcenter_root_password"),
            vm_size: vars.field("mgmt_vcenter_vm_size").string_or(&d.vcenter_vm_size),
            storage_size: vars
                .field("mgmt_vcenter_storage_size")
                .string_or(&d.vcenter_storage_size),
            admin_user_sso_password: self.password(vars, "mgmt_vcenter_admin_password"),
            sso_domain: d.sso_domain.clone(),
            use_existing_deployment: false,
        }
    }

    fn datastore_spec(&self, vars: &Variables) -> DatastoreSpec {
        let d = self.defaults;
        DatastoreSpec {
            vsan_spec: VsanSpec {
                failures_to_tolerate: vars
                    .field("mgmt_vsan_failures_to_tolerate")
                    .number_or(d.vsan_failures_to_tolerate),
                vsan_dedup: vars.field("mgmt_vsan_dedup_enabled").bool_or(d.vsan_dedup),
                esa_config: EsaConfig {
                    enabled: vars.field("mgmt_vsan_esa_enabled").bool_or(d.vsan_esa),
                },
                datastore_name: vars
                    .field("mgmt_vsan_datastore_name")
                    .string_or(&d.vsan_datastore_name),
            },
        }
    }

    fn nsxt_spec(&self, vars: &Variables) -> NsxtSpec {
        let d = self.defaults;

        let mut nsxt_managers: Vec<_> = vars
            .field("mgmt_nsx_managers")
            .objects()
            .map(|manager| NsxtManager {
                hostname: manager
                    .field("hostname")
                    .string()
                    .or_else(|| manager.field("name").string())
                    .unwrap_or_else(|| d.nsx_manager_hostname.clone()),
            })
            .collect();

        if nsxt_managers.is_empty() {
            nsxt_managers.push(NsxtManager {
                hostname: d.nsx_manager_hostname.clone(),
            });
        }

        NsxtSpec {
            nsxt_manager_size: vars
                .field("mgmt_nsx_manager_size")
                .string_or(&d.nsx_manager_size),
            nsxt_managers,
            vip_fqdn: vars.field("mgmt_nsx_vip_fqdn").string_or(&d.nsx_vip_fqdn),
            use_existing_deployment: false,
            nsxt_admin_password: self.password(vars, "mgmt_nsx_admin_password"),
            nsxt_audit_password: self.password(vars, "mgmt_nsx_audit_password"),
            root_nsxt_manager_password: self.password(vars, "mgmt_nsx_root_password"),
            skip_nsx_overlay_over_management_network: true,
            transport_vlan_id: vars
                .field("mgmt_nsx_transport_vlan_id")
                .number_or(d.nsx_transport_vlan_id),
            ip_address_pool_spec: self.ip_address_pool_spec(vars),
        }
    }

    /// Only the first subnet of the pool is used
    fn ip_address_pool_spec(&self, vars: &Variables) -> Option<IpAddressPoolSpec> {
        let pool = vars.field("mgmt_nsx_ip_pool").object()?;
        let first = pool.field("subnets").non_empty_list()?.first()?;

        let empty = Object::new();
        let subnet = first.as_object().unwrap_or(&empty);

        let ranges = subnet
            .field("ip_ranges")
            .objects()
            .map(|range| IpAddressPoolRange {
                start: range.field("start").string_or(""),
                end: range.field("end").string_or(""),
            })
            .collect();

        Some(IpAddressPoolSpec {
            name: pool.field("name").string_or(&self.defaults.nsx_ip_pool_name),
            description: pool
                .field("description")
                .string_or(&self.defaults.nsx_ip_pool_description),
            subnets: vec![IpAddressPoolSubnet {
                cidr: subnet.field("cidr").string_or(""),
                gateway: subnet.field("gateway").string_or(""),
                ip_address_pool_ranges: ranges,
            }],
        })
    }

    fn host_specs(&self, vars: &Variables) -> Option<Vec<HostSpec>> {
        let hosts = vars
            .field("mgmt_esxi_hosts")
            .non_empty_list()?
            .iter()
            .filter_map(Value::as_object)
            .map(|host| HostSpec {
                hostname: host.field("hostname").string_or(""),
                credentials: Credentials {
                    username: host
                        .field("username")
                        .string_or(&self.defaults.esxi_username),
                    password: host.field("password").string_or(""),
                },
                ssl_thumbprint: host
                    .field("ssl_thumbprint")
                    .string()
                    .map(|thumbprint| thumbprint.trim().to_string())
                    .filter(|thumbprint| !thumbprint.is_empty()),
            })
            .collect();

        Some(hosts)
    }

    fn network_specs(&self, vars: &Variables) -> Option<Vec<NetworkSpec>> {
        let networks = vars
            .field("mgmt_networks")
            .non_empty_list()?
            .iter()
            .filter_map(Value::as_object)
            .map(|network| self.network_spec(network))
            .collect();

        Some(networks)
    }

    fn network_spec(&self, network: &Object) -> NetworkSpec {
        let d = self.defaults;

        let ranges: Vec<_> = network
            .field("ip_ranges")
            .objects()
            .map(|range| IpAddressRange {
                start_ip_address: range.field("start").string_or(""),
                end_ip_address: range.field("end").string_or(""),
            })
            .collect();

        NetworkSpec {
            network_type: network.field("network_type").string_or(""),
            subnet: network.field("subnet").string_or(""),
            gateway: network.field("gateway").string_or(""),
            subnet_mask: network.field("subnet_mask").string_or(""),
            vlan_id: network.field("vlan_id").string_or(&d.network_vlan_id),
            mtu: network.field("mtu").number_or(d.network_mtu),
            teaming_policy: network
                .field("teaming_policy")
                .string_or(&d.network_teaming_policy),
            active_uplinks: network
                .field("active_uplinks")
                .list_or(&d.network_active_uplinks),
            standby_uplinks: network.field("standby_uplinks").list_or(&[]),
            port_group_key: network.field("port_group_key").string_or(""),
            include_ip_address_ranges: (!ranges.is_empty()).then_some(ranges),
        }
    }

    fn dvs_specs(&self, vars: &Variables) -> Option<Vec<DvsSpec>> {
        let switches = vars
            .field("mgmt_dvs_configs")
            .non_empty_list()?
            .iter()
            .filter_map(Value::as_object)
            .map(|dvs| self.dvs_spec(dvs))
            .collect();

        Some(switches)
    }

    fn dvs_spec(&self, dvs: &Object) -> DvsSpec {
        let vmnics_to_uplinks = dvs
            .field("vmnic_mappings")
            .objects()
            .map(|mapping| VmnicToUplink {
                id: mapping.field("vmnic").string_or(""),
                uplink: mapping.field("uplink").string_or(""),
            })
            .collect();

        let nsxt_switch_config = dvs
            .field("nsx_switch_config")
            .object()
            .and_then(|config| config.field("transport_zones").non_empty_list())
            .map(|zones| NsxtSwitchConfig {
                transport_zones: zones.to_vec(),
            });

        DvsSpec {
            dvs_name: dvs.field("name").string_or(""),
            networks: dvs.field("networks").list_or(&[]),
            mtu: dvs.field("mtu").number_or(self.defaults.dvs_mtu),
            vmnics_to_uplinks,
            nsxt_switch_config,
            nsx_teamings: dvs
                .field("nsx_teamings")
                .non_empty_list()
                .map(<[Value]>::to_vec),
        }
    }

    fn vcf_automation_spec(&self, vars: &Variables) -> Option<VcfAutomationSpec> {
        if !vars.field("vcf_automation_enabled").is_true() {
            return None;
        }

        let d = self.defaults;
        Some(VcfAutomationSpec {
            hostname: vars
                .field("vcf_automation_hostname")
                .string_or(&d.automation_hostname),
            admin_user_password: self.password(vars, "vcf_automation_admin_password"),
            ip_pool: vars.field("vcf_automation_ip_pool").list_or(&[]),
            node_prefix: vars
                .field("vcf_automation_node_prefix")
                .string_or(&d.automation_node_prefix),
            internal_cluster_cidr: vars
                .field("vcf_automation_internal_cluster_cidr")
                .string_or(&d.automation_internal_cluster_cidr),
            use_existing_deployment: false,
        })
    }

    /// Always exactly one node, named after the first configured node if there is one
    fn vcf_operations_spec(&self, vars: &Variables) -> Option<VcfOperationsSpec> {
        if !vars.field("vcf_operations_enabled").is_true() {
            return None;
        }

        let d = self.defaults;
        let hostname = vars
            .field("vcf_operations_nodes")
            .list()
            .and_then(<[Value]>::first)
            .and_then(Value::as_object)
            .map(|node| node.field("hostname").string_or(&d.operations_hostname))
            .unwrap_or_else(|| d.operations_hostname.clone());

        Some(VcfOperationsSpec {
            nodes: vec![OperationsNode {
                hostname,
                root_user_password: d.password.clone(),
                node_type: "master".into(),
            }],
            admin_user_password: self.password(vars, "vcf_operations_admin_password"),
            appliance_size: vars
                .field("vcf_operations_appliance_size")
                .string_or(&d.operations_appliance_size),
            use_existing_deployment: false,
            load_balancer_fqdn: vars.field("vcf_operations_load_balancer_fqdn").string(),
        })
    }

    fn vcf_operations_collector_spec(&self, vars: &Variables) -> Option<VcfOperationsCollectorSpec> {
        if !vars.field("vcf_operations_collector_enabled").is_true() {
            return None;
        }

        let d = self.defaults;
        let size = vars
            .field("vcf_operations_collector_appliance_size")
            .string_or(&d.operations_collector_appliance_size);

        Some(VcfOperationsCollectorSpec {
            application_size: size.clone(),
            hostname: vars
                .field("vcf_operations_collector_hostname")
                .string_or(&d.operations_collector_hostname),
            appliance_size: size,
            root_user_password: self.password(vars, "vcf_operations_collector_root_password"),
            use_existing_deployment: false,
        })
    }

    fn vcf_operations_fleet_management_spec(
        &self,
        vars: &Variables,
    ) -> Option<VcfOperationsFleetManagementSpec> {
        if !vars.field("vcf_fleet_manager_enabled").is_true() {
            return None;
        }

        Some(VcfOperationsFleetManagementSpec {
            hostname: vars
                .field("vcf_fleet_manager_hostname")
                .string_or(&self.defaults.fleet_manager_hostname),
            root_user_password: self.password(vars, "vcf_fleet_manager_root_password"),
            admin_user_password: self.password(vars, "vcf_fleet_manager_admin_password"),
            use_existing_deployment: false,
        })
    }

    fn sddc_manager_spec(&self, vars: &Variables) -> Option<SddcManagerSpec> {
        if !vars.field("sddc_manager_config_enabled").is_true() {
            return None;
        }

        Some(SddcManagerSpec {
            hostname: vars
                .field("sddc_manager_hostname")
                .string_or(&self.defaults.sddc_manager_hostname),
            use_existing_deployment: false,
            root_password: self.password(vars, "sddc_manager_root_password"),
            ssh_password: self.password(vars, "sddc_manager_ssh_password"),
            local_user_password: self.password(vars, "sddc_manager_local_password"),
        })
    }
}
