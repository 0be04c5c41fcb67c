// /pos-dashboard/services/pos-service/src/utils/validator.rs

use crate::{
    models::OrderStatusFilter,
    utils::error::{AppError, AppResult},
};

/// Validasi string setelah di-trim dan kembalikan versi yang sudah di-trim
pub fn validate_string_length(
    value: &str,
    field_name: &str,
    min_len: usize,
    max_len: usize,
) -> AppResult<String> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();

    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{} tidak boleh kosong", field_name)));
    }

    if length < min_len {
        return Err(AppError::ValidationError(
            format!("{} minimal {} karakter", field_name, min_len)
        ));
    }

    if length > max_len {
        return Err(AppError::ValidationError(
            format!("{} maksimal {} karakter", field_name, max_len)
        ));
    }

    Ok(trimmed.to_string())
}

/// Parse query `status` untuk list orders, kosong berarti ALL
pub fn parse_status_filter(status: Option<&str>) -> AppResult<OrderStatusFilter> {
    match status.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(OrderStatusFilter::All),
        Some(raw) => OrderStatusFilter::parse(raw).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Status '{}' tidak valid. Valid: ALL, AWAITING_PAYMENT, PROCESSING, DONE",
                raw
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;

    #[test]
    fn test_string_length_trims() {
        assert_eq!(validate_string_length("  Minuman ", "name", 3, 50).unwrap(), "Minuman");
        assert!(validate_string_length("   ", "name", 3, 50).is_err());
        assert!(validate_string_length(" ab ", "name", 3, 50).is_err());
        assert!(validate_string_length(&"x".repeat(51), "name", 3, 50).is_err());
    }

    #[test]
    fn test_parse_status_filter() {
        assert_eq!(parse_status_filter(None).unwrap(), OrderStatusFilter::All);
        assert_eq!(parse_status_filter(Some("")).unwrap(), OrderStatusFilter::All);
        assert_eq!(
            parse_status_filter(Some("processing")).unwrap(),
            OrderStatusFilter::Only(OrderStatus::Processing)
        );
        assert!(matches!(
            parse_status_filter(Some("PAID")),
            Err(AppError::BadRequest(_))
        ));
    }
}
