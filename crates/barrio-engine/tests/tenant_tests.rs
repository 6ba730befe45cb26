//! Tests for explicit tenant resolution and identifier validation.

use barrio_engine::tenant::in_tenant;
use barrio_engine::{
    resolve_tenant, validate_national_id_format, validate_rut, BarrioError, Facility, TenantId,
};

fn tenant(id: u64) -> TenantId {
    TenantId::new(id).unwrap()
}

#[test]
fn zero_is_not_a_tenant() {
    assert!(TenantId::new(0).is_none());
    assert!(serde_json::from_str::<TenantId>("0").is_err());
    assert_eq!(serde_json::from_str::<TenantId>("4").unwrap(), tenant(4));
}

#[test]
fn user_tenant_wins() {
    assert_eq!(resolve_tenant(Some(tenant(3)), None), Ok(tenant(3)));
    assert_eq!(resolve_tenant(Some(tenant(3)), Some(tenant(3))), Ok(tenant(3)));
}

#[test]
fn anonymous_requests_must_name_a_tenant() {
    assert_eq!(resolve_tenant(None, Some(tenant(5))), Ok(tenant(5)));
    assert_eq!(resolve_tenant(None, None), Err(BarrioError::TenantRequired));
}

#[test]
fn cross_tenant_requests_are_rejected() {
    assert_eq!(
        resolve_tenant(Some(tenant(3)), Some(tenant(1))),
        Err(BarrioError::TenantMismatch {
            requested: 1,
            actual: 3
        })
    );
}

#[test]
fn in_tenant_filters_records() {
    let facilities: Vec<Facility> = (1..=4)
        .map(|id| Facility {
            id,
            tenant: tenant(if id % 2 == 0 { 2 } else { 1 }),
            name: format!("Facility {id}"),
            capacity: 10,
            is_active: true,
        })
        .collect();

    let ids: Vec<u64> = in_tenant(&facilities, tenant(2)).map(|f| f.id).collect();
    assert_eq!(ids, vec![2, 4]);
}

// ---------------------------------------------------------------------------
// National ids
// ---------------------------------------------------------------------------

#[test]
fn valid_ruts_in_every_format() {
    for rut in ["12.345.678-5", "12345678-5", "123456785", "11.111.111-1", ""] {
        assert!(validate_rut(rut).is_ok(), "{rut} should be valid");
    }
}

#[test]
fn rut_with_k_check_digit_is_case_insensitive() {
    // 10.000.013: reversed digits 3,1,0,0,0,0,0,1 -> 6 + 3 + 3 = 12, 12 % 11 = 1 -> K.
    assert!(validate_rut("10.000.013-K").is_ok());
    assert!(validate_rut("10.000.013-0").is_err());
    // 6: 6*2 = 12, 12 % 11 = 1 -> K.
    assert!(validate_rut("6-K").is_ok());
    assert!(validate_rut("6-k").is_ok());
}

#[test]
fn invalid_ruts_are_rejected() {
    for rut in ["12.345.678-9", "1", "12a45678-5", "12345678-X"] {
        assert!(
            matches!(validate_rut(rut), Err(BarrioError::InvalidNationalId(_))),
            "{rut} should be rejected"
        );
    }
}

#[test]
fn national_id_format_rules() {
    assert!(validate_national_id_format("").is_ok());
    assert!(validate_national_id_format("AB-12.34").is_ok());
    assert!(validate_national_id_format("A").is_err());
    assert!(validate_national_id_format("12 34").is_err());
    assert!(validate_national_id_format(&"9".repeat(51)).is_err());
    assert!(validate_national_id_format(&"9".repeat(50)).is_ok());
}
