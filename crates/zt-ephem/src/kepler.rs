//! Heliocentric positions from Keplerian mean elements.
//!
//! Elements and rates are the JPL "Keplerian Elements for Approximate
//! Positions of the Major Planets" fit for 1800 AD to 2050 AD, referred to the
//! J2000 ecliptic and equinox. Accuracy is a fraction of a degree, well inside
//! what sign-level classification needs.

use std::f64::consts::TAU;

/// Mean orbital elements at J2000.0 and their rates per Julian century.
#[derive(Debug, Clone, Copy)]
pub struct OrbitalElements {
    /// Semi-major axis (au).
    pub a: [f64; 2],
    /// Eccentricity.
    pub e: [f64; 2],
    /// Inclination (degrees).
    pub i: [f64; 2],
    /// Mean longitude (degrees).
    pub l: [f64; 2],
    /// Longitude of perihelion (degrees).
    pub peri: [f64; 2],
    /// Longitude of the ascending node (degrees).
    pub node: [f64; 2],
}

pub const MERCURY: OrbitalElements = OrbitalElements {
    a: [0.387_099_27, 0.000_000_37],
    e: [0.205_635_93, 0.000_019_06],
    i: [7.004_979_02, -0.005_947_49],
    l: [252.250_323_50, 149_472.674_111_75],
    peri: [77.457_796_28, 0.160_476_89],
    node: [48.330_765_93, -0.125_340_81],
};

pub const VENUS: OrbitalElements = OrbitalElements {
    a: [0.723_335_66, 0.000_003_90],
    e: [0.006_776_72, -0.000_041_07],
    i: [3.394_676_05, -0.000_788_90],
    l: [181.979_099_50, 58_517.815_387_29],
    peri: [131.602_467_18, 0.002_683_29],
    node: [76.679_842_55, -0.277_694_18],
};

/// Earth-Moon barycenter.
pub const EARTH_MOON: OrbitalElements = OrbitalElements {
    a: [1.000_002_61, 0.000_005_62],
    e: [0.016_711_23, -0.000_043_92],
    i: [-0.000_015_31, -0.012_946_68],
    l: [100.464_571_66, 35_999.372_449_81],
    peri: [102.937_681_93, 0.323_273_64],
    node: [0.0, 0.0],
};

pub const MARS: OrbitalElements = OrbitalElements {
    a: [1.523_710_34, 0.000_018_47],
    e: [0.093_394_10, 0.000_078_82],
    i: [1.849_691_42, -0.008_131_31],
    l: [-4.553_432_05, 19_140.302_684_99],
    peri: [-23.943_629_59, 0.444_410_88],
    node: [49.559_538_91, -0.292_573_43],
};

pub const JUPITER: OrbitalElements = OrbitalElements {
    a: [5.202_887_00, -0.000_116_07],
    e: [0.048_386_24, -0.000_132_53],
    i: [1.304_396_95, -0.001_837_14],
    l: [34.396_440_51, 3_034.746_127_75],
    peri: [14.728_479_83, 0.212_526_68],
    node: [100.473_909_09, 0.204_691_06],
};

pub const SATURN: OrbitalElements = OrbitalElements {
    a: [9.536_675_94, -0.001_250_60],
    e: [0.053_861_79, -0.000_509_91],
    i: [2.485_991_87, 0.001_936_09],
    l: [49.954_244_23, 1_222.493_622_01],
    peri: [92.598_878_31, -0.418_972_16],
    node: [113.662_424_48, -0.288_677_94],
};

pub const URANUS: OrbitalElements = OrbitalElements {
    a: [19.189_164_64, -0.001_961_76],
    e: [0.047_257_44, -0.000_043_97],
    i: [0.772_637_83, -0.002_429_39],
    l: [313.238_104_51, 428.482_027_85],
    peri: [170.954_276_30, 0.408_052_81],
    node: [74.016_925_03, 0.042_405_89],
};

pub const NEPTUNE: OrbitalElements = OrbitalElements {
    a: [30.069_922_76, 0.000_262_91],
    e: [0.008_590_48, 0.000_051_05],
    i: [1.770_043_47, 0.000_353_72],
    l: [-55.120_029_69, 218.459_453_25],
    peri: [44.964_762_27, -0.322_414_64],
    node: [131.784_225_74, -0.005_086_64],
};

pub const PLUTO: OrbitalElements = OrbitalElements {
    a: [39.482_116_75, -0.000_315_96],
    e: [0.248_827_30, 0.000_051_70],
    i: [17.140_012_06, 0.000_048_18],
    l: [238.929_038_33, 145.207_805_15],
    peri: [224.068_916_29, -0.040_629_42],
    node: [110.303_936_84, -0.011_834_82],
};

const KEPLER_TOLERANCE: f64 = 1e-12;
const KEPLER_MAX_ITERATIONS: usize = 30;

fn at(element: [f64; 2], t: f64) -> f64 {
    element[0] + element[1] * t
}

/// Solves Kepler's equation `M = E - e sin E` for the eccentric anomaly.
///
/// Both angles are in radians.
pub fn eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    // Reduce to (-pi, pi] so the starting guess is close for all orbits.
    let m = (mean_anomaly + std::f64::consts::PI).rem_euclid(TAU) - std::f64::consts::PI;
    let mut anomaly = m + e * m.sin();

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let delta = (anomaly - e * anomaly.sin() - m) / (1.0 - e * anomaly.cos());
        anomaly -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            break;
        }
    }
    anomaly
}

impl OrbitalElements {
    /// Heliocentric rectangular coordinates in the J2000 ecliptic frame (au).
    ///
    /// `t` is in Julian centuries since J2000.0.
    pub fn heliocentric(&self, t: f64) -> [f64; 3] {
        let a = at(self.a, t);
        let e = at(self.e, t);
        let inclination = at(self.i, t).to_radians();
        let mean_longitude = at(self.l, t);
        let perihelion = at(self.peri, t);
        let node = at(self.node, t);

        let argument = (perihelion - node).to_radians();
        let mean_anomaly = (mean_longitude - perihelion).to_radians();
        let anomaly = eccentric_anomaly(mean_anomaly, e);

        // Orbital plane, x toward perihelion.
        let xp = a * (anomaly.cos() - e);
        let yp = a * (1.0 - e * e).sqrt() * anomaly.sin();

        let (sin_w, cos_w) = argument.sin_cos();
        let (sin_o, cos_o) = node.to_radians().sin_cos();
        let (sin_i, cos_i) = inclination.sin_cos();

        [
            (cos_w * cos_o - sin_w * sin_o * cos_i) * xp
                + (-sin_w * cos_o - cos_w * sin_o * cos_i) * yp,
            (cos_w * sin_o + sin_w * cos_o * cos_i) * xp
                + (-sin_w * sin_o + cos_w * cos_o * cos_i) * yp,
            (sin_w * sin_i) * xp + (cos_w * sin_i) * yp,
        ]
    }
}

/// Spherical ecliptic longitude and latitude (degrees) of a vector.
pub fn to_spherical(v: [f64; 3]) -> (f64, f64) {
    let [x, y, z] = v;
    let longitude = y.atan2(x).to_degrees();
    let latitude = z.atan2(x.hypot(y)).to_degrees();
    (longitude, latitude)
}
