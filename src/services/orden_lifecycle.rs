//! Ciclo de vida de la orden de trabajo
//!
//! Efectos de los cambios de estado sobre las fechas y resolución del
//! monto total. Cualquier estado puede pasar a cualquier otro: no hay
//! máquina de estados, solo efectos de entrada.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::orden_trabajo::{EstadoOrden, OrdenTrabajo};
use crate::models::servicio::Servicio;

/// Estado y fechas de una orden, lo único que tocan las transiciones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstadoFechas {
    pub status: EstadoOrden,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl From<&OrdenTrabajo> for EstadoFechas {
    fn from(orden: &OrdenTrabajo) -> Self {
        Self {
            status: orden.status,
            start_date: orden.start_date,
            end_date: orden.end_date,
        }
    }
}

/// Aplica la transición a `new_status`.
///
/// Entrar en `in_progress` fija `start_date` si no existe; entrar en
/// `completed` fija `end_date` si no existe. Volver a `pending` no limpia
/// ninguna fecha.
pub fn apply_status_transition(
    current: EstadoFechas,
    new_status: EstadoOrden,
    now: DateTime<Utc>,
) -> EstadoFechas {
    let mut next = EstadoFechas {
        status: new_status,
        ..current
    };

    match new_status {
        EstadoOrden::InProgress if next.start_date.is_none() => next.start_date = Some(now),
        EstadoOrden::Completed if next.end_date.is_none() => next.end_date = Some(now),
        _ => {}
    }

    next
}

/// Monto de una orden nueva: el explícito o el precio del servicio
pub fn resolve_amount_on_create(explicit: Option<Decimal>, servicio: &Servicio) -> Decimal {
    explicit.unwrap_or(servicio.price)
}

/// Monto de una orden actualizada.
///
/// Si cambió el servicio y el llamador no cambió el monto (lo omitió o
/// reenvió el mismo valor), se toma el precio del servicio nuevo. Sin
/// cambio de servicio, el monto enviado o el actual.
pub fn resolve_amount_on_update(
    actual: &OrdenTrabajo,
    servicio: &Servicio,
    explicit: Option<Decimal>,
) -> Decimal {
    let servicio_cambio = actual.servicio_id != servicio.id;

    match explicit {
        Some(amount) if servicio_cambio && amount == actual.total_amount => servicio.price,
        Some(amount) => amount,
        None if servicio_cambio => servicio.price,
        None => actual.total_amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::str::FromStr;
    use uuid::Uuid;

    fn servicio(price: &str) -> Servicio {
        let now = Utc::now();
        Servicio {
            id: Uuid::new_v4(),
            taller_id: Uuid::new_v4(),
            name: "Sincronización".to_string(),
            description: None,
            price: Decimal::from_str(price).unwrap(),
            duration_hours: Decimal::from_str("2.5").unwrap(),
            status: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn orden(servicio: &Servicio, amount: &str) -> OrdenTrabajo {
        let now = Utc::now();
        OrdenTrabajo {
            id: Uuid::new_v4(),
            taller_id: servicio.taller_id,
            cliente_id: Some(Uuid::new_v4()),
            vehiculo_id: Uuid::new_v4(),
            empleado_id: Uuid::new_v4(),
            servicio_id: servicio.id,
            description: "Revisión general".to_string(),
            status: EstadoOrden::Pending,
            total_amount: Decimal::from_str(amount).unwrap(),
            start_date: None,
            end_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn pendiente() -> EstadoFechas {
        EstadoFechas {
            status: EstadoOrden::Pending,
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn test_in_progress_sets_start_date_once() {
        let t1 = Utc::now();
        let first = apply_status_transition(pendiente(), EstadoOrden::InProgress, t1);
        assert_eq!(first.status, EstadoOrden::InProgress);
        assert_eq!(first.start_date, Some(t1));
        assert!(first.end_date.is_none());

        let t2 = t1 + Duration::hours(3);
        let second = apply_status_transition(first, EstadoOrden::InProgress, t2);
        assert_eq!(second.start_date, Some(t1));
    }

    #[test]
    fn test_completed_sets_end_date_and_pending_keeps_it() {
        let t1 = Utc::now();
        let completed = apply_status_transition(pendiente(), EstadoOrden::Completed, t1);
        assert_eq!(completed.end_date, Some(t1));
        // completar directamente desde pending no fija start_date
        assert!(completed.start_date.is_none());

        let reopened = apply_status_transition(completed, EstadoOrden::Pending, t1 + Duration::days(1));
        assert_eq!(reopened.status, EstadoOrden::Pending);
        assert_eq!(reopened.end_date, Some(t1));
    }

    #[test]
    fn test_any_status_can_move_to_any_other() {
        let now = Utc::now();
        for from in EstadoOrden::ALL {
            for to in EstadoOrden::ALL {
                let start = EstadoFechas {
                    status: from,
                    ..pendiente()
                };
                assert_eq!(apply_status_transition(start, to, now).status, to);
            }
        }
    }

    #[test]
    fn test_cancel_does_not_touch_dates() {
        let next = apply_status_transition(pendiente(), EstadoOrden::Cancelled, Utc::now());
        assert_eq!(next.start_date, None);
        assert_eq!(next.end_date, None);
    }

    #[test]
    fn test_amount_defaults_to_service_price() {
        let s = servicio("150000.00");
        let amount = resolve_amount_on_create(None, &s);
        assert_eq!(amount, Decimal::from_str("150000.00").unwrap());
        assert_eq!(amount.to_string(), "150000.00");

        let explicit = resolve_amount_on_create(Some(Decimal::from_str("99000").unwrap()), &s);
        assert_eq!(explicit, Decimal::from_str("99000").unwrap());
    }

    #[test]
    fn test_amount_refreshes_when_service_changes() {
        let viejo = servicio("80000.00");
        let nuevo = servicio("120000.00");
        let actual = orden(&viejo, "80000.00");

        // sin monto explícito
        assert_eq!(resolve_amount_on_update(&actual, &nuevo, None), nuevo.price);
        // mismo monto reenviado en el registro completo
        assert_eq!(
            resolve_amount_on_update(&actual, &nuevo, Some(actual.total_amount)),
            nuevo.price
        );
        // monto cambiado explícitamente
        let custom = Decimal::from_str("100000.00").unwrap();
        assert_eq!(resolve_amount_on_update(&actual, &nuevo, Some(custom)), custom);
    }

    #[test]
    fn test_amount_kept_when_service_unchanged() {
        let s = servicio("80000.00");
        let actual = orden(&s, "95000.00");
        assert_eq!(resolve_amount_on_update(&actual, &s, None), actual.total_amount);

        let custom = Decimal::from_str("70000.00").unwrap();
        assert_eq!(resolve_amount_on_update(&actual, &s, Some(custom)), custom);
    }
}
