use serde::Deserialize;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// Filtros comunes de los listados de clientes, vehículos, empleados y servicios
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListFilters {
    /// Texto libre (nombre, email, matrícula... según la entidad)
    pub search: Option<String>,
    pub status: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListFilters {
    /// Patrón ILIKE para la búsqueda, `None` si no hay texto
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s))
    }

    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_bounds() {
        let filters = ListFilters {
            limit: Some(10_000),
            offset: Some(-5),
            ..Default::default()
        };
        assert_eq!(filters.limit(), MAX_LIMIT);
        assert_eq!(filters.offset(), 0);
        assert_eq!(ListFilters::default().limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_search_pattern() {
        let filters = ListFilters {
            search: Some("  gomez ".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.search_pattern().as_deref(), Some("%gomez%"));

        let blank = ListFilters {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.search_pattern().is_none());
    }
}
