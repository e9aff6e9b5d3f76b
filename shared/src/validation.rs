//! Validation utilities for the Vehicle Marketplace Platform
//!
//! Includes India-specific validations since super-vendor territories are
//! Indian states.

use rust_decimal::Decimal;

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate that a quantity is a positive whole number
pub fn validate_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be a positive integer");
    }
    Ok(())
}

/// Validate that a monetary amount is positive
pub fn validate_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Amount must be positive");
    }
    Ok(())
}

/// Validate invoice number format: INV-SV-YYYY-NNNN (sequence may exceed
/// four digits once the per-year counter grows past 9999)
pub fn validate_invoice_number(number: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = number.split('-').collect();
    if parts.len() != 4 || parts[0] != "INV" || parts[1] != "SV" {
        return Err("Invoice number must be in format INV-SV-YYYY-NNNN");
    }
    if parts[2].len() != 4 || !parts[2].chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid year in invoice number");
    }
    if parts[3].len() < 4 || !parts[3].chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid sequence number in invoice number");
    }
    Ok(())
}

/// Validate payment reference format: PAY-SV-<epoch-ms>
pub fn validate_payment_reference(reference: &str) -> Result<(), &'static str> {
    let rest = reference
        .strip_prefix("PAY-SV-")
        .ok_or("Payment reference must start with 'PAY-SV-'")?;
    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
        return Err("Payment reference must end with an epoch timestamp");
    }
    Ok(())
}

// ============================================================================
// India-Specific Validations
// ============================================================================

/// Validate Indian phone number format
/// Accepts: 9876543210, 098-765-43210, +919876543210
pub fn validate_indian_phone(phone: &str) -> Result<(), &'static str> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    // Standard 10-digit mobile starting 6-9
    if digits.len() == 10 && digits.starts_with(['6', '7', '8', '9']) {
        return Ok(());
    }
    // With leading zero
    if digits.len() == 11 && digits.starts_with('0') {
        return Ok(());
    }
    // International format with country code 91
    if digits.len() == 12 && digits.starts_with("91") {
        return Ok(());
    }

    Err("Invalid Indian phone number format")
}

/// Indian states served by the platform
pub const INDIAN_STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Delhi",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
];

/// Validate state name is a recognized Indian state (case-insensitive)
pub fn validate_state(state: &str) -> Result<(), &'static str> {
    let state_lower = state.trim().to_lowercase();
    if INDIAN_STATES.iter().any(|s| s.to_lowercase() == state_lower) {
        return Ok(());
    }
    Err("State is not a recognized Indian state")
}

/// Validate GSTIN format: 2-digit state code, 10-char PAN, entity digit,
/// 'Z', checksum character
pub fn validate_gstin(gstin: &str) -> Result<(), &'static str> {
    if gstin.len() != 15 {
        return Err("GSTIN must be 15 characters");
    }
    let chars: Vec<char> = gstin.chars().collect();
    if !chars[0].is_ascii_digit() || !chars[1].is_ascii_digit() {
        return Err("GSTIN must start with a 2-digit state code");
    }
    if !chars.iter().all(|c| c.is_ascii_alphanumeric()) {
        return Err("GSTIN must be alphanumeric");
    }
    if chars[13] != 'Z' {
        return Err("Invalid GSTIN format");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("dealer.north@marketplace.co.in").is_ok());
    }

    #[test]
    fn test_validate_email_invalid() {
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(500).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Decimal::from(100)).is_ok());
        assert!(validate_amount(Decimal::ZERO).is_err());
        assert!(validate_amount(Decimal::from(-50)).is_err());
    }

    #[test]
    fn test_validate_invoice_number_valid() {
        assert!(validate_invoice_number("INV-SV-2024-0001").is_ok());
        assert!(validate_invoice_number("INV-SV-2025-10000").is_ok());
    }

    #[test]
    fn test_validate_invoice_number_invalid() {
        assert!(validate_invoice_number("INV-2024-0001").is_err());
        assert!(validate_invoice_number("INV-SV-24-0001").is_err());
        assert!(validate_invoice_number("INV-SV-2024-001").is_err());
        assert!(validate_invoice_number("PAY-SV-2024-0001").is_err());
    }

    #[test]
    fn test_validate_payment_reference() {
        assert!(validate_payment_reference("PAY-SV-1700000000000").is_ok());
        assert!(validate_payment_reference("PAY-SV-").is_err());
        assert!(validate_payment_reference("PAY-SV-abc").is_err());
        assert!(validate_payment_reference("INV-SV-1700000000000").is_err());
    }

    // ========================================================================
    // India-Specific Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_indian_phone_valid() {
        assert!(validate_indian_phone("9876543210").is_ok());
        assert!(validate_indian_phone("098-765-43210").is_ok());
        assert!(validate_indian_phone("+919876543210").is_ok());
        assert!(validate_indian_phone("919876543210").is_ok());
    }

    #[test]
    fn test_validate_indian_phone_invalid() {
        assert!(validate_indian_phone("12345").is_err());
        assert!(validate_indian_phone("1234567890").is_err()); // starts with 1
        assert!(validate_indian_phone("abcdefghij").is_err());
    }

    #[test]
    fn test_validate_state_valid() {
        assert!(validate_state("Maharashtra").is_ok());
        assert!(validate_state("tamil nadu").is_ok()); // Case insensitive
        assert!(validate_state(" Karnataka ").is_ok()); // Trimmed
    }

    #[test]
    fn test_validate_state_invalid() {
        assert!(validate_state("Atlantis").is_err());
        assert!(validate_state("").is_err());
    }

    #[test]
    fn test_validate_gstin_valid() {
        assert!(validate_gstin("27AAPFU0939F1ZV").is_ok());
    }

    #[test]
    fn test_validate_gstin_invalid() {
        assert!(validate_gstin("27AAPFU0939F1V").is_err()); // Too short
        assert!(validate_gstin("XXAAPFU0939F1ZV").is_err()); // No state code
        assert!(validate_gstin("27AAPFU0939F1XV").is_err()); // Missing Z
    }
}
