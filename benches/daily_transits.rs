use criterion::{black_box, criterion_group, criterion_main, Criterion};

use astrolog::astrolog_errors::EngineError;
use astrolog::celestial::catalog::BodyId;
use astrolog::celestial::named;
use astrolog::constants::{Celsius, HectoPascal, JulianDay, Meter, RADEG};
use astrolog::coordinates::{EquatorCoord, GeoLocation};
use astrolog::ephemeris::horizontal::equatorial_to_horizontal;
use astrolog::ephemeris::{
    CalcFlags, EphemerisEngine, GeoPosition, NodApsFlags, RawPosition, RiseTransFlags,
    TransitTarget,
};
use astrolog::time::CalendarDate;

const OBLIQUITY: f64 = 23.439_291;
const STEP: f64 = 10.0 / 1440.0;

/// Circular-orbit toy ephemeris with a stepping event search.
#[derive(Default)]
struct ToyEngine;

impl ToyEngine {
    fn ecliptic_lon(jd: JulianDay, code: i32) -> f64 {
        let rate = 0.985_647 * (1.0 + code as f64 * 0.37);
        (280.46 + rate * (jd - 2_451_545.0) + code as f64 * 40.0).rem_euclid(360.0)
    }

    fn equatorial(jd: JulianDay, target: &TransitTarget<'_>) -> EquatorCoord {
        let code = match target {
            TransitTarget::Body(id) => id.code(),
            TransitTarget::Star(name) => name.len() as i32,
        };
        let lon = ToyEngine::ecliptic_lon(jd, code) * RADEG;
        let eps = OBLIQUITY * RADEG;
        let ra = (lon.sin() * eps.cos()).atan2(lon.cos());
        let decl = (lon.sin() * eps.sin()).asin();
        EquatorCoord::new(ra / RADEG, decl / RADEG)
    }

    fn altitude(jd: JulianDay, target: &TransitTarget<'_>, geopos: &GeoPosition) -> f64 {
        let eq = ToyEngine::equatorial(jd, target);
        equatorial_to_horizontal(jd, geopos, &eq, 0.0, 0.0).true_altitude
    }
}

impl EphemerisEngine for ToyEngine {
    fn set_topocentric_frame(&mut self, _location: &GeoLocation, _altitude: Meter) {}

    fn body_position(
        &mut self,
        jd: JulianDay,
        body: BodyId,
        _flags: CalcFlags,
    ) -> Result<RawPosition, EngineError> {
        Ok(RawPosition::new(ToyEngine::ecliptic_lon(jd, body.code()), 0.0, 1.0))
    }

    fn fixed_star_position(
        &mut self,
        designator: &str,
        jd: JulianDay,
        _flags: CalcFlags,
    ) -> Result<RawPosition, EngineError> {
        let code = designator.len() as i32;
        Ok(RawPosition::new(ToyEngine::ecliptic_lon(jd, code), 0.0, 1.0e6))
    }

    fn focal_point_position(
        &mut self,
        jd: JulianDay,
        body: BodyId,
        _method: NodApsFlags,
        _flags: CalcFlags,
    ) -> Result<RawPosition, EngineError> {
        let lon = ToyEngine::ecliptic_lon(jd, body.code()) + 180.0;
        Ok(RawPosition::new(lon.rem_euclid(360.0), 0.0, 2.0))
    }

    fn search_transit_event(
        &mut self,
        start: JulianDay,
        target: TransitTarget<'_>,
        event: RiseTransFlags,
        geopos: &GeoPosition,
        _pressure: HectoPascal,
        _temperature: Celsius,
        _flags: CalcFlags,
    ) -> Result<Option<JulianDay>, EngineError> {
        let mut jd = start;
        let mut prev = ToyEngine::altitude(jd, &target, geopos);
        let mut prev_slope = 0.0;
        while jd < start + 1.5 {
            let next = ToyEngine::altitude(jd + STEP, &target, geopos);
            let slope = next - prev;
            let hit = if event.contains(RiseTransFlags::RISE) {
                prev < 0.0 && next >= 0.0
            } else if event.contains(RiseTransFlags::SET) {
                prev >= 0.0 && next < 0.0
            } else if event.contains(RiseTransFlags::MTRANSIT) {
                prev_slope > 0.0 && slope <= 0.0
            } else {
                prev_slope < 0.0 && slope >= 0.0
            };
            if hit {
                return Ok(Some(jd));
            }
            prev = next;
            prev_slope = slope;
            jd += STEP;
        }
        Ok(None)
    }
}

fn bench_daily_transits(c: &mut Criterion) {
    let date = CalendarDate::new(2024, 3, 20).unwrap();
    let paris = GeoLocation::new(2.3522, 48.8566).unwrap();
    let tromso = GeoLocation::new(18.9553, 69.6492).unwrap();
    let novile = named::NOVILE;

    c.bench_function("daily_transits/novile_paris", |b| {
        let mut engine = ToyEngine;
        b.iter(|| {
            for celestial in &novile {
                black_box(
                    celestial
                        .daily_transits(&mut engine, black_box(&date), black_box(&paris))
                        .unwrap(),
                );
            }
        })
    });

    c.bench_function("daily_transits/sun_tromso", |b| {
        let mut engine = ToyEngine;
        b.iter(|| {
            black_box(
                named::SUN
                    .daily_transits(&mut engine, black_box(&date), black_box(&tromso))
                    .unwrap(),
            )
        })
    });

    let black_suns = named::black_sun::ALL;
    c.bench_function("daily_transits/black_suns", |b| {
        let mut engine = ToyEngine;
        b.iter(|| {
            for bs in &black_suns {
                black_box(bs.daily_transits(&mut engine, &date, &paris).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_daily_transits);
criterion_main!(benches);
