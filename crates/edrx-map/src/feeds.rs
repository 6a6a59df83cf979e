//! The shipped field maps, one per feed.
//!
//! These are configuration data: the pipeline accepts a JSON override for
//! any of them, and schema drift is expected to land here, not in the
//! engine. Placeholder kinds record why a column is blank — `pending`
//! columns await a source correlation (mostly policy names exported as
//! bare GUIDs), `unpopulated` columns exist in the consumer schema but are
//! not yet fed by the source environment.

use edrx_model::{FeedKind, TargetSchema};

use crate::types::{DedupeSpec, FeedSpec, FieldMap, FieldSpec};

/// The shipped spec for a feed.
pub fn feed_spec(kind: FeedKind) -> FeedSpec {
    match kind {
        FeedKind::Host => host_feed(),
        FeedKind::Vulnerability => vulnerability_feed(),
        FeedKind::Remediation => remediation_feed(),
    }
}

/// Daily host inventory: one row per device record, deduplicated on
/// hostname keeping the most recently seen row. Exports both the wide BI
/// projection and the narrow database-loader projection.
pub fn host_feed() -> FeedSpec {
    let fields = vec![
        FieldSpec::direct("Hostname", "hostname"),
        FieldSpec::direct("CID", "cid"),
        FieldSpec::customer("Customer Name", "cid"),
        FieldSpec::direct("Last Seen", "last_seen"),
        FieldSpec::direct("First Seen", "first_seen"),
        FieldSpec::direct("Platform", "platform_name"),
        FieldSpec::direct("OS Version", "os_version"),
        FieldSpec::direct("OS Build", "os_build"),
        FieldSpec::direct("OS Product Name", "os_product_name"),
        FieldSpec::direct("Kernel Version", "kernel_version"),
        FieldSpec::direct("Model", "system_product_name"),
        FieldSpec::direct("Manufacturer", "system_manufacturer"),
        FieldSpec::direct("Type", "product_type_desc"),
        FieldSpec::direct("Chassis", "chassis_type_desc"),
        FieldSpec::direct("Last Reboot", "last_reboot"),
        FieldSpec::join_list("OU", "ou"),
        FieldSpec::direct("Site", "site_name"),
        // Policy ids arrive as bare GUIDs; human-readable names need a
        // lookup that the export does not carry yet.
        FieldSpec::pending("Prevention Policy"),
        FieldSpec::pending("Response Policy"),
        FieldSpec::pending("Sensor Update Policy"),
        FieldSpec::pending("Host Retention Policy"),
        FieldSpec::pending("USB Device Policy"),
        FieldSpec::pending("Kubernetes Admission Control Policy"),
        FieldSpec::direct("Host ID", "device_id"),
        FieldSpec::direct("Local IP", "local_ip"),
        FieldSpec::direct("Connection IP", "connection_ip"),
        FieldSpec::direct("Default Gateway IP", "default_gateway_ip"),
        FieldSpec::direct("External IP", "external_ip"),
        FieldSpec::direct("Domain", "machine_domain"),
        FieldSpec::direct("MAC Address", "mac_address"),
        FieldSpec::direct("Connection MAC Address", "connection_mac_address"),
        FieldSpec::pending("Detections Disabled"),
        FieldSpec::direct("Status", "status"),
        FieldSpec::direct(
            "Filesystem Containment Status",
            "filesystem_containment_status",
        ),
        FieldSpec::direct("CPUID", "cpu_signature"),
        FieldSpec::direct("Serial Number", "serial_number"),
        FieldSpec::direct("Sensor Version", "agent_version"),
        FieldSpec::pending("Sensor Tags"),
        FieldSpec::unpopulated("Cloud Service Provider"),
        FieldSpec::unpopulated("Cloud Service Account ID"),
        FieldSpec::unpopulated("Cloud Service Instance ID"),
        FieldSpec::unpopulated("Cloud Service Zone/Group"),
        FieldSpec::unpopulated("Kubernetes Cluster ID"),
        FieldSpec::unpopulated("Kubernetes Server Git Version"),
        FieldSpec::unpopulated("Kubernetes Server Version"),
        FieldSpec::direct("RFM", "reduced_functionality_mode"),
        FieldSpec::pending("Linux Sensor Mode"),
        FieldSpec::pending("Deployment Type"),
        FieldSpec::pending("Email"),
        FieldSpec::unpopulated("Pod ID"),
        FieldSpec::unpopulated("Pod Name"),
        FieldSpec::unpopulated("Pod Namespace"),
        FieldSpec::unpopulated("Pod Labels"),
        FieldSpec::unpopulated("Pod Annotations"),
        FieldSpec::unpopulated("Pod IP4"),
        FieldSpec::unpopulated("Pod IP6"),
        FieldSpec::unpopulated("Pod Hostname"),
        FieldSpec::unpopulated("Pod Host IP4"),
        FieldSpec::unpopulated("Pod Host IP6"),
        FieldSpec::unpopulated("Pod Service Account Name"),
        FieldSpec::join_list("Host Groups", "groups"),
        FieldSpec::direct("Last Logged In User Account", "last_login_user"),
        FieldSpec::direct("Last User Account Login", "last_login_timestamp"),
        FieldSpec::pending("Last Logged In UID"),
        FieldSpec::direct("Last Logged In User SID", "last_login_user_sid"),
    ];

    FeedSpec {
        kind: FeedKind::Host,
        field_map: FieldMap::new(fields),
        dedupe: Some(DedupeSpec {
            key_columns: vec!["Hostname".to_string()],
            recency_column: "Last Seen".to_string(),
        }),
        narrow: Some(host_sql_schema()),
        stamp_snapshot_date: true,
    }
}

/// The database loader's fixed column list and renames for the host feed.
/// The casing of `Last_Logged_in_User_SID` matches the load table as-is.
fn host_sql_schema() -> TargetSchema {
    TargetSchema::new([
        "SnapshotDate",
        "Customer_ID",
        "Host_ID",
        "Hostname",
        "First_Seen",
        "Last_Seen",
        "Platform",
        "OS_Version",
        "OS_Build",
        "OS_Product_Name",
        "Kernel_Version",
        "Model",
        "Manufacturer",
        "Type",
        "OU",
        "Site",
        "Status",
        "Serial_Number",
        "Last_Logged_In_User_Account",
        "Last_User_Account_Login",
        "Last_Logged_in_User_SID",
    ])
    .with_renames([
        ("CID", "Customer_ID"),
        ("Host ID", "Host_ID"),
        ("First Seen", "First_Seen"),
        ("Last Seen", "Last_Seen"),
        ("OS Version", "OS_Version"),
        ("OS Build", "OS_Build"),
        ("OS Product Name", "OS_Product_Name"),
        ("Kernel Version", "Kernel_Version"),
        ("Serial Number", "Serial_Number"),
        ("Last Logged In User Account", "Last_Logged_In_User_Account"),
        ("Last User Account Login", "Last_User_Account_Login"),
        ("Last Logged In User SID", "Last_Logged_in_User_SID"),
    ])
}

/// Daily vulnerability findings: the `cve` sub-object carries the finding,
/// the `apps` list nests one sub-object per affected product, so each
/// (record, product) pair becomes its own row. Deduplicated on the
/// host/finding/product composite, keeping the most recently updated row.
pub fn vulnerability_feed() -> FeedSpec {
    let fields = vec![
        FieldSpec::direct("Hostname", "hostname"),
        FieldSpec::direct("CID", "cid"),
        FieldSpec::customer("Customer Name", "cid"),
        FieldSpec::direct("Local IP", "local_ip"),
        FieldSpec::direct("Platform", "platform"),
        FieldSpec::direct("OS Version", "os_version"),
        FieldSpec::direct("Domain", "machine_domain"),
        FieldSpec::join_list("OU", "ou"),
        FieldSpec::direct("Site", "site_name"),
        FieldSpec::join_attr("Host Groups", "groups", "name"),
        FieldSpec::direct("Status", "status"),
        FieldSpec::object_attr("CVE ID", "cve", "id"),
        FieldSpec::object_attr("Severity", "cve", "severity"),
        FieldSpec::object_attr("CVSS Base Score", "cve", "base_score"),
        FieldSpec::object_attr("ExPRT Rating", "cve", "exprt_rating"),
        FieldSpec::object_attr("CVE Description", "cve", "description").sanitized(),
        FieldSpec::object_attr("Vendor Advisory", "cve", "vendor_advisory").sanitized(),
        FieldSpec::object_attr("Published Date", "cve", "published_date"),
        FieldSpec::expanded("Product", "product_name_version"),
        FieldSpec::expanded("Remediation IDs", "remediation_ids"),
        FieldSpec::direct("First Found", "created_timestamp"),
        FieldSpec::direct("Last Updated", "updated_timestamp"),
    ];

    FeedSpec {
        kind: FeedKind::Vulnerability,
        field_map: FieldMap::new(fields).with_expand("apps"),
        dedupe: Some(DedupeSpec {
            key_columns: vec![
                "Hostname".to_string(),
                "CVE ID".to_string(),
                "Product".to_string(),
            ],
            recency_column: "Last Updated".to_string(),
        }),
        narrow: None,
        stamp_snapshot_date: false,
    }
}

/// Daily remediation recommendations: append-only (no stable entity key in
/// the export), one row per record with the product list joined into a
/// single field.
pub fn remediation_feed() -> FeedSpec {
    let fields = vec![
        FieldSpec::direct("Hostname", "hostname"),
        FieldSpec::direct("LocalIP", "local_ip"),
        FieldSpec::direct("HostType", "host_type"),
        FieldSpec::direct("OSVersion", "os_version"),
        FieldSpec::direct("MachineDomain", "machine_domain"),
        FieldSpec::direct("OU", "ou"),
        FieldSpec::direct("SiteName", "site_name"),
        FieldSpec::direct("RecommendedRemediation", "recommended_remediation"),
        FieldSpec::direct("RemediationDetail", "remediation_detail"),
        FieldSpec::join_list("Products", "products"),
        FieldSpec::direct("Count", "count"),
        FieldSpec::direct("Critical", "critical"),
        FieldSpec::direct("High", "high"),
        FieldSpec::direct("Medium", "medium"),
        FieldSpec::direct("Low", "low"),
        FieldSpec::direct("Unknown", "unknown"),
        FieldSpec::join_attr("GroupNames", "groups", "name"),
        FieldSpec::join_list("Tags", "tags"),
        FieldSpec::direct("HostID", "host_id"),
        FieldSpec::direct("Exploits", "exploits"),
        FieldSpec::direct("Platform", "platform"),
        FieldSpec::direct("ExPRT Critical", "exprt_critical"),
        FieldSpec::direct("ExPRT High", "exprt_high"),
        FieldSpec::direct("ExPRT Medium", "exprt_medium"),
        FieldSpec::direct("ExPRT Low", "exprt_low"),
        FieldSpec::direct("ExPRT Unknown", "exprt_unknown"),
        FieldSpec::direct("AdditionalRemediationAdvisoryUrl", "vendor_advisory"),
        FieldSpec::join_attr("AdditionalRemediationSteps", "extra_remediation_steps", "text")
            .sanitized(),
        FieldSpec::direct("Asset Criticality", "asset_criticality"),
        FieldSpec::blank("Asset Roles"),
        FieldSpec::direct("Internet exposure", "internet_exposure"),
        FieldSpec::direct("Managed By", "managed_by"),
        FieldSpec::join_list("Data Providers", "data_providers"),
        FieldSpec::direct("Third-party Asset IDs", "third_party_asset_ids"),
        FieldSpec::direct("CID", "cid"),
        FieldSpec::direct("Customer", "customer_name"),
        FieldSpec::direct("Recommendation Type", "recommendation_type"),
        FieldSpec::direct("Patch Publication Date", "patch_publication_date"),
    ];

    FeedSpec {
        kind: FeedKind::Remediation,
        field_map: FieldMap::new(fields).with_expand("products"),
        dedupe: None,
        narrow: None,
        stamp_snapshot_date: false,
    }
}
