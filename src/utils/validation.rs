//! Utilidades de validación
//!
//! Este módulo contiene las reglas personalizadas que usan los requests
//! (`#[validate(custom = "...")]`) además de las que trae `validator`.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    /// VIN ISO 3779: 17 caracteres, sin I, O ni Q
    pub static ref VIN_REGEX: Regex = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap();
    /// Matrícula: letras, números y guiones
    pub static ref LICENSE_PLATE_REGEX: Regex = Regex::new(r"^[A-Z0-9][A-Z0-9\- ]{3,18}[A-Z0-9]$").unwrap();
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 7 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de matrícula de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    if !LICENSE_PLATE_REGEX.is_match(&value.to_uppercase()) {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar número de documento (cédula, NIT, pasaporte)
pub fn validate_document_number(value: &str) -> Result<(), ValidationError> {
    let valid = value.len() >= 5
        && value.len() <= 30
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if !valid {
        let mut error = ValidationError::new("document_number");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

fn validate_non_negative<T: PartialOrd + num_traits::Zero + Serialize>(
    value: &T,
) -> Result<(), ValidationError> {
    if *value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), value);
        return Err(error);
    }
    Ok(())
}

fn validate_positive<T: PartialOrd + num_traits::Zero + Serialize>(
    value: &T,
) -> Result<(), ValidationError> {
    if *value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), value);
        return Err(error);
    }
    Ok(())
}

/// Montos de dinero: no negativos
pub fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(value)
}

/// Duraciones en horas: estrictamente positivas
pub fn validate_duration(value: &Decimal) -> Result<(), ValidationError> {
    validate_positive(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Cambio de aceite").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("3001234567").is_ok());
        assert!(validate_phone("+57 (300) 123-4567").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate("ABC-123").is_ok());
        assert!(validate_license_plate("abc123").is_ok());
        assert!(validate_license_plate("A").is_err());
        assert!(validate_license_plate("-ABC12").is_err());
    }

    #[test]
    fn test_vin_regex() {
        assert!(VIN_REGEX.is_match("1HGCM82633A004352"));
        assert!(!VIN_REGEX.is_match("1HGCM82633A00435"));
        // I, O y Q no son válidos en un VIN
        assert!(!VIN_REGEX.is_match("1HGCM82633A00435O"));
    }

    #[test]
    fn test_validate_document_number() {
        assert!(validate_document_number("1020304050").is_ok());
        assert!(validate_document_number("900.123.456-7").is_ok());
        assert!(validate_document_number("12").is_err());
        assert!(validate_document_number("12 34 56").is_err());
    }

    #[test]
    fn test_validate_amounts() {
        assert!(validate_amount(&Decimal::from_str("150000.00").unwrap()).is_ok());
        assert!(validate_amount(&Decimal::ZERO).is_ok());
        assert!(validate_amount(&Decimal::from_str("-1").unwrap()).is_err());
        assert!(validate_duration(&Decimal::from_str("1.5").unwrap()).is_ok());
        assert!(validate_duration(&Decimal::ZERO).is_err());
    }
}
