//! Searchable process fields of the Carbon Black EDR query language.
//!
//! Used by the equality heuristic: `<field>=` is the slow, non-indexed form
//! of a lookup that should normally be written `<field>:`.

/// Known search fields, in the order the EDR query reference lists them.
///
/// Versioned with the crate. Order only affects how early
/// [`has_equality_operator`](super::classifier::has_equality_operator) stops.
pub const SEARCH_FIELDS: &[&str] = &[
    "blocked_md5",
    "blocked_status",
    "childproc_count",
    "childproc_md5",
    "childproc_sha256",
    "childproc_name",
    "cmdline",
    "comments",
    "company_name",
    "copied_mod_len",
    "crossproc_count",
    "crossproc_md5",
    "crossproc_sha256",
    "crossproc_name",
    "crossproc_type",
    "digsig_issuer",
    "digsig_prog_name",
    "digsig_publisher",
    "digsig_result",
    "digsig_sign_time",
    "digsig_subject",
    "domain",
    "file_desc",
    "file_version",
    "filemod",
    "filemod_count",
    "filewrite_md5",
    "filewrite_sha256",
    "group",
    "has_emet_config",
    "has_emet_event",
    "host_count",
    "host_type",
    "hostname",
    "internal_name",
    "ipaddr",
    "ipv6addr",
    "ipport",
    "is_64bit",
    "is_executable_image",
    "ja3",
    "ja3s",
    "last_server_update",
    "last_update",
    "legal_copyright",
    "legal_trademark",
    "md5",
    "sha256",
    "modload",
    "modload_count",
    "netconn_count",
    "observed_filename",
    "orig_mod_len",
    "original_filename",
    "os_type",
    "parent_id",
    "parent_md5",
    "parent_sha256",
    "parent_name",
    "path",
    "private_build",
    "process_id",
    "process_md5",
    "process_sha256",
    "process_name",
    "product_desc",
    "product_name",
    "product_version",
    "regmod",
    "regmod_count",
    "sensor_id",
    "server_added_timestamp",
    "special_build",
    "start",
    "tampered",
    "username",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn field_list_size() {
        assert_eq!(SEARCH_FIELDS.len(), 76);
    }

    #[test]
    fn field_names_are_unique() {
        let unique: HashSet<_> = SEARCH_FIELDS.iter().collect();
        assert_eq!(unique.len(), SEARCH_FIELDS.len());
    }

    #[test]
    fn field_names_have_no_operators() {
        for field in SEARCH_FIELDS {
            assert!(
                !field.contains(['=', ':', ' ']),
                "field name should be bare: {field}"
            );
        }
    }
}
