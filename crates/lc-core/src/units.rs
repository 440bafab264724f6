// lc-core/src/units.rs

use uom::si::f64::{
    Capacitance as UomCapacitance, ElectricCharge as UomElectricCharge,
    ElectricCurrent as UomElectricCurrent, ElectricPotential as UomElectricPotential,
    Energy as UomEnergy, Inductance as UomInductance, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Capacitance = UomCapacitance;
pub type Charge = UomElectricCharge;
pub type Current = UomElectricCurrent;
pub type Energy = UomEnergy;
pub type Inductance = UomInductance;
pub type Time = UomTime;
pub type Voltage = UomElectricPotential;

#[inline]
pub fn farad(v: f64) -> Capacitance {
    use uom::si::capacitance::farad;
    Capacitance::new::<farad>(v)
}

#[inline]
pub fn microfarad(v: f64) -> Capacitance {
    use uom::si::capacitance::microfarad;
    Capacitance::new::<microfarad>(v)
}

#[inline]
pub fn henry(v: f64) -> Inductance {
    use uom::si::inductance::henry;
    Inductance::new::<henry>(v)
}

#[inline]
pub fn millihenry(v: f64) -> Inductance {
    use uom::si::inductance::millihenry;
    Inductance::new::<millihenry>(v)
}

#[inline]
pub fn coulomb(v: f64) -> Charge {
    use uom::si::electric_charge::coulomb;
    Charge::new::<coulomb>(v)
}

#[inline]
pub fn microcoulomb(v: f64) -> Charge {
    use uom::si::electric_charge::microcoulomb;
    Charge::new::<microcoulomb>(v)
}

#[inline]
pub fn ampere(v: f64) -> Current {
    use uom::si::electric_current::ampere;
    Current::new::<ampere>(v)
}

#[inline]
pub fn volt(v: f64) -> Voltage {
    use uom::si::electric_potential::volt;
    Voltage::new::<volt>(v)
}

#[inline]
pub fn joule(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}
