//! A fully populated cluster definition shared by the model and conversion tests.
use super::*;
use maplit::btreemap;

pub(crate) const SSH_PUBLIC_KEY: &str = "ssh-rsa AAAAB3NzaC1yc2EAAAADAQABAAABAQC8kvKH5ytKeUlK2cyiHs7RkGPxZpGCaGvPkWzxKOAcTvxJ7S8PY3YH9F1GHrXhZkdGRSENPAI+BDH39odEGTCTWNC9l3bJgqCsXZuL4JFG6eJeO6hmz+mEbFMZh45m2UXKy/Mrbb0rQYD55a6ZRAb4+wT7YVY7XOhEe8FtHL0xxNYX+DKxNwqm43hxXXQvTR1Gl5gNZxnVJgvWt+dgaDAyWC0b2GNqlvkQ5zqx7jJyrtWbUwGKtxRhJLt63lWMOYqrp/kfk6dbnEq7W2v+yhsHlhjyLwmGHHqN0hMfwtAj2mwBSpnDAXK4FPZ9MTbS4spD+WpWnDJE6dq8F3T user@example";

fn extension() -> Extension {
    Extension {
        name: "sampleExtension".to_string(),
        single_or_all: "single".to_string(),
        template: "{{foobar}}".to_string(),
    }
}

fn keyvault_secret_ref() -> KeyvaultSecretRef {
    KeyvaultSecretRef {
        vault_id: "fooVaultID".to_string(),
        secret_name: "fooSecretName".to_string(),
        secret_version: "fooSecretVersion".to_string(),
    }
}

/// A DC/OS configuration with every field set.
pub(crate) fn dcos_config() -> DcosConfig {
    DcosConfig {
        dcos_bootstrap_url: "SampleDcosBootstrapURL".to_string(),
        dcos_windows_bootstrap_url: "SampleWindowsDcosBootstrapURL".to_string(),
        registry: "SampleRegistry".to_string(),
        registry_pass: Secret::from("SampleRegistryPass"),
        registry_user: "SampleRegistryUser".to_string(),
        dcos_cluster_package_list_id: "SampleDcosClusterPackageListID".to_string(),
        dcos_provider_package_id: "SampleDcosProviderPackageID".to_string(),
        bootstrap_profile: Some(BootstrapProfile {
            vm_size: "Standard_Ds1_v1".to_string(),
            os_disk_size_gb: 256,
            oauth_enabled: true,
            static_ip: "172.0.0.1".to_string(),
            subnet: "255.255.255.0".to_string(),
        }),
        ..Default::default()
    }
}

fn agent_pool(name: &str) -> AgentPoolProfile {
    AgentPoolProfile {
        name: name.to_string(),
        count: 2,
        vm_size: "sampleVM".to_string(),
        dns_prefix: "blueorange".to_string(),
        fqdn: "blueorange.westus2.com".to_string(),
        os_type: Some(OsType::Linux),
        subnet: "sampleSubnet".to_string(),
        ..Default::default()
    }
}

fn master_kubernetes_config() -> KubernetesConfig {
    KubernetesConfig {
        kubernetes_image_base: "quay.io".to_string(),
        cluster_subnet: "fooClusterSubnet".to_string(),
        network_policy: Some(NetworkPolicy::Calico),
        network_plugin: Some(NetworkPlugin::Azure),
        container_runtime: Some(ContainerRuntime::Docker),
        max_pods: 3,
        docker_bridge_subnet: "sampleDockerSubnet".to_string(),
        dns_service_ip: "172.0.0.1".to_string(),
        service_cidr: "172.0.0.1/16".to_string(),
        use_managed_identity: true,
        user_assigned_id: "fooUserAssigneID".to_string(),
        user_assigned_client_id: "fooUserAssigneClientID".to_string(),
        moby_version: "3.0.0".to_string(),
        containerd_version: "1.2.4".to_string(),
        custom_ccm_image: "sampleCCMImage".to_string(),
        use_cloud_controller_manager: Some(true),
        custom_windows_package_url: "https://deisartifacts.windows.net".to_string(),
        windows_node_binaries_url: "https://deisartifacts.windows.net".to_string(),
        use_instance_metadata: Some(true),
        load_balancer_sku: "Basic".to_string(),
        exclude_master_from_standard_lb: Some(false),
        enable_rbac: Some(true),
        enable_secure_kubelet: Some(true),
        enable_aggregated_apis: true,
        enable_data_encryption_at_rest: Some(true),
        enable_pod_security_policy: Some(true),
        enable_encryption_with_external_kms: Some(true),
        gc_high_threshold: 85,
        gc_low_threshold: 80,
        etcd_version: "3.0.0".to_string(),
        etcd_disk_size_gb: "256".to_string(),
        etcd_encryption_key: "sampleEncruptionKey".to_string(),
        azure_cni_version: "1.0.25".to_string(),
        azure_cni_url_linux: "https://mirror.azk8s.cn/kubernetes/azure-container-networking/linux"
            .to_string(),
        azure_cni_url_windows:
            "https://mirror.azk8s.cn/kubernetes/azure-container-networking/windows".to_string(),
        key_vault_sku: "Basic".to_string(),
        maximum_load_balancer_rule_count: 3,
        proxy_mode: Some(KubeProxyMode::IpTables),
        private_azure_registry_server: "sampleRegistryServerURL".to_string(),
        kubelet_config: btreemap! {"barKey".to_string() => "bazValue".to_string()},
        addons: vec![KubernetesAddon {
            name: "sampleAddon".to_string(),
            enabled: Some(true),
            containers: vec![KubernetesContainerSpec {
                name: "sampleK8sContainer".to_string(),
                image: "sampleK8sImage".to_string(),
                memory_requests: "20Mi".to_string(),
                cpu_requests: "10m".to_string(),
                ..Default::default()
            }],
            config: btreemap! {"sampleKey".to_string() => "sampleVal".to_string()},
            ..Default::default()
        }],
        api_server_config: btreemap! {
            "sampleAPIServerKey".to_string() => "sampleAPIServerVal".to_string(),
        },
        controller_manager_config: btreemap! {
            "sampleCMKey".to_string() => "sampleCMVal".to_string(),
        },
        cloud_controller_manager_config: btreemap! {
            "sampleCCMKey".to_string() => "sampleCCMVal".to_string(),
        },
        scheduler_config: btreemap! {
            "sampleSchedulerKey".to_string() => "sampleSchedulerVal".to_string(),
        },
        private_cluster: Some(PrivateCluster {
            enabled: Some(true),
            jumpbox_profile: Some(PrivateJumpboxProfile {
                name: "sampleJumpboxProfile".to_string(),
                vm_size: "Standard_DS1_v2".to_string(),
                os_disk_size_gb: 512,
                username: "userName".to_string(),
                public_key: SSH_PUBLIC_KEY.to_string(),
                storage_profile: Some(StorageProfile::StorageAccount),
            }),
        }),
        pod_security_policy_config: btreemap! {
            "samplePSPConfigKey".to_string() => "samplePSPConfigVal".to_string(),
        },
        ..Default::default()
    }
}

pub(crate) fn default_container_service() -> ContainerService {
    ContainerService {
        id: "sampleID".to_string(),
        location: "westus2".to_string(),
        name: "sampleCS".to_string(),
        plan: Some(ResourcePurchasePlan {
            name: "sampleRPP".to_string(),
            product: "sampleProduct".to_string(),
            promotion_code: "sampleCode".to_string(),
            publisher: "samplePublisher".to_string(),
        }),
        tags: btreemap! {"foo".to_string() => "bar".to_string()},
        resource_type: "sampleType".to_string(),
        properties: Properties {
            windows_profile: Some(WindowsProfile {
                admin_username: "sampleAdminUsername".to_string(),
                admin_password: Secret::from("sampleAdminPassword"),
                ..Default::default()
            }),
            diagnostics_profile: Some(DiagnosticsProfile {
                vm_diagnostics: Some(VmDiagnostics {
                    enabled: true,
                    storage_url: Some("http://foobar.com/search".to_string()),
                }),
            }),
            linux_profile: Some(LinuxProfile {
                admin_username: "azureuser".to_string(),
                ssh: SshConfig {
                    public_keys: vec![PublicKey {
                        key_data: SSH_PUBLIC_KEY.to_string(),
                    }],
                },
                secrets: vec![KeyVaultSecrets {
                    source_vault: Some(KeyVaultId {
                        id: "sampleKeyVaultID".to_string(),
                    }),
                    vault_certificates: vec![KeyVaultCertificate {
                        certificate_url: "FooCertURL".to_string(),
                        certificate_store: "BarCertStore".to_string(),
                    }],
                }],
                custom_nodes_dns: Some(CustomNodesDns {
                    dns_server: "SampleDNSServer".to_string(),
                }),
                custom_search_domain: Some(CustomSearchDomain {
                    name: "FooCustomSearchDomain".to_string(),
                    realm_user: "sampleRealmUser".to_string(),
                    realm_password: Secret::from("sampleRealmPassword"),
                }),
                ..Default::default()
            }),
            service_principal_profile: Some(ServicePrincipalProfile {
                client_id: "fooClientID".to_string(),
                secret: Secret::from("fooSecret"),
                object_id: "fooObjectID".to_string(),
                keyvault_secret_ref: Some(keyvault_secret_ref()),
            }),
            extension_profiles: vec![ExtensionProfile {
                name: "fooExtension".to_string(),
                version: "fooVersion".to_string(),
                extension_parameters: "fooExtensionParameters".to_string(),
                extension_parameters_key_vault_ref: Some(keyvault_secret_ref()),
                root_url: "fooRootURL".to_string(),
                script: "fooSsript".to_string(),
                url_query: "fooURL".to_string(),
            }],
            jumpbox_profile: Some(JumpboxProfile {
                os_type: Some(OsType::Linux),
                dns_prefix: "blueorange".to_string(),
                fqdn: "blueorange.westus2.com".to_string(),
            }),
            certificate_profile: Some(CertificateProfile {
                ca_certificate: Secret::from("SampleCACert"),
                ca_private_key: Secret::from("SampleCAPrivateKey"),
                api_server_certificate: Secret::from("SampleAPIServerCert"),
                api_server_private_key: Secret::from("SampleAPIServerPrivateKey"),
                client_certificate: Secret::from("SampleClientCert"),
                client_private_key: Secret::from("SampleClientPrivateKey"),
                kube_config_certificate: Secret::from("SampleKubeConfigCert"),
                kube_config_private_key: Secret::from("SampleKubeConfigPrivateKey"),
                etcd_client_certificate: Secret::from("SampleEtcdClientCert"),
                etcd_client_private_key: Secret::from("SampleEtcdClientPrivateKey"),
                etcd_server_certificate: Secret::from("SampleEtcdServerCert"),
                etcd_server_private_key: Secret::from("SampleEtcdServerPrivateKey"),
                ..Default::default()
            }),
            feature_flags: Some(FeatureFlags {
                enable_cse_run_in_background: true,
                ..Default::default()
            }),
            aad_profile: Some(AadProfile {
                client_app_id: "SampleClientAppID".to_string(),
                server_app_id: "ServerAppID".to_string(),
                server_app_secret: Secret::from("ServerAppSecret"),
                tenant_id: "SampleTenantID".to_string(),
                admin_group_id: "SampleAdminGroupID".to_string(),
                authenticator: Some(AuthenticatorType::Webhook),
            }),
            custom_profile: Some(CustomProfile {
                orchestrator: "Kubernetes".to_string(),
            }),
            orchestrator_profile: Some(OrchestratorProfile {
                kubernetes_config: Some(KubernetesConfig::default()),
                ..OrchestratorProfile::new(OrchestratorType::Kubernetes, "1.11.6")
            }),
            master_profile: Some(MasterProfile {
                count: 1,
                dns_prefix: "blueorange".to_string(),
                subject_alt_names: vec!["fooSubjectAltName".to_string()],
                custom_files: Some(vec![CustomFile {
                    source: "sampleCustomFileSource".to_string(),
                    dest: "sampleCustomFileDest".to_string(),
                }]),
                vm_size: "Standard_DS1_v1".to_string(),
                os_disk_size_gb: 256,
                vnet_subnet_id: "sampleVnetSubnetID".to_string(),
                subnet: "sampleSubnet".to_string(),
                vnet_cidr: "10.240.0.0/8".to_string(),
                agent_vnet_subnet_id: "sampleAgentVnetSubnetID".to_string(),
                first_consecutive_static_ip: "10.240.0.0".to_string(),
                ip_address_count: 5,
                storage_profile: Some(StorageProfile::StorageAccount),
                http_source_address_prefix: "fooHTTPSourceAddressPrefix".to_string(),
                oauth_enabled: true,
                preprovision_extension: Some(extension()),
                extensions: vec![extension()],
                distro: Some(Distro::Ubuntu),
                image_ref: Some(ImageReference {
                    name: "FooImageRef".to_string(),
                    resource_group: "FooImageRefResourceGroup".to_string(),
                    ..Default::default()
                }),
                kubernetes_config: Some(master_kubernetes_config()),
                ..Default::default()
            }),
            agent_pool_profiles: vec![
                agent_pool("sampleAgent"),
                AgentPoolProfile {
                    image_ref: Some(ImageReference {
                        name: "testImage".to_string(),
                        resource_group: "testRg".to_string(),
                        subscription_id: "testSub".to_string(),
                        gallery: "testGallery".to_string(),
                        version: "0.0.1".to_string(),
                    }),
                    ..agent_pool("sampleAgent-public")
                },
            ],
            ..Default::default()
        },
    }
}
