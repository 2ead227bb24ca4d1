//! Generación de marcas de tiempo sintéticas para comentarios enmascarados.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use super::constants::{MASK_SPACING_MAX_SECS, MASK_SPACING_MIN_SECS, TIMESTAMP_FORMAT};

/// Fuente del instante de referencia usado al enmascarar fechas.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reloj del sistema.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Reloj detenido en un instante concreto.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Genera `count` marcas de tiempo crecientes a partir de `start`.
///
/// Cada comentario queda separado del anterior por un intervalo uniforme entre
/// uno y dos minutos; la primera marca ya incluye ese primer intervalo.
pub fn generate_masked_timestamps<R>(
    count: usize,
    start: DateTime<Utc>,
    rng: &mut R,
) -> Vec<String>
where
    R: Rng + ?Sized,
{
    let spacing = Uniform::new_inclusive(MASK_SPACING_MIN_SECS, MASK_SPACING_MAX_SECS);

    let mut elapsed = 0.0_f64;
    (0..count)
        .map(|_| {
            elapsed += spacing.sample(rng);
            let offset = Duration::milliseconds((elapsed * 1000.0).round() as i64);
            format_timestamp(start + offset)
        })
        .collect()
}

/// Formatea un instante como `AAAA-MM-DDTHH:MM:SSZ`, sin fracciones de segundo.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}
