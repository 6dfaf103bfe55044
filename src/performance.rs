// Copyright (c) 2018-2022  Ministerio de Fomento
//                          Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

// Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>,
//            Daniel Jiménez González <dani@ietcc.csic.es>,
//            Marta Sorribes Gil <msorribes@ietcc.csic.es>

/*!
Eficiencia energética
=====================

Ponderación de la energía final mediante factores de paso (energía primaria renovable
y no renovable) en dos pasos de cálculo:

- paso A: recursos usados para la energía suministrada menos los de la energía exportada
- paso B: recursos ahorrados a la red por la energía exportada, afectados por el
  factor de exportación k_exp

El resultado A+B es el del paso A menos el ahorro del paso B.
*/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    balance::{check_k, energy_balance, AnnualBalance, BalanceForCarrier},
    cte,
    energydata::EnergyData,
    error::Result,
    rennren::RenNren,
    types::{Carrier, Dest, Step},
    wfactors::Factors,
};

/// Energía ponderada de un vector energético
///
/// Weighted energy of a single carrier
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightedEnergyForCarrier {
    /// Weighted delivered energy (step A)
    pub we_delivered_A: RenNren,
    /// Weighted exported energy (step A)
    pub we_exported_A: RenNren,
    /// Weighted energy, step A
    pub we_A: RenNren,
    /// Resources saved by the grid due to exported energy (step B, k_exp applied)
    pub we_exported_AB: RenNren,
    /// Weighted energy, step A+B
    pub we: RenNren,
}

/// Energía ponderada del edificio (todos los vectores)
///
/// Weighted energy for all carriers
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightedEnergy {
    /// Weighted energy, step A+B
    pub EP: RenNren,
    /// Weighted energy, step A
    pub EPpasoA: RenNren,
}

/// Datos y resultados de un cálculo de eficiencia energética
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyPerformance {
    /// Redelivery factor [0, 1]
    pub k_rdel: f64,
    /// Exported energy factor [0, 1]
    pub k_exp: f64,
    /// Energy balance results by carrier
    pub balance_cr: BTreeMap<Carrier, BalanceForCarrier>,
    /// Weighted energy by carrier
    pub weighted_cr: BTreeMap<Carrier, WeightedEnergyForCarrier>,
    /// Global weighted energy
    pub ep: WeightedEnergy,
}

/// Calcula la eficiencia energética del edificio
///
/// Compute the energy balance and weighted energy for all carriers.
///
/// * `data` - energy data by carrier
/// * `k_rdel` - redelivery factor [0, 1]
/// * `k_exp` - exported energy factor [0, 1]
/// * `wfactors` - weighting factors. `None` uses the regulatory factors
///
/// # Errors
///
/// * `k_rdel` or `k_exp` outside [0, 1]
/// * Missing weighting factors needed for the computation
pub fn energy_performance(
    data: &EnergyData,
    k_rdel: f64,
    k_exp: f64,
    wfactors: Option<&Factors>,
) -> Result<EnergyPerformance> {
    check_k("k_exp", k_exp)?;
    let default_wfactors;
    let wfactors = match wfactors {
        Some(wfactors) => wfactors,
        None => {
            default_wfactors = cte::default_wfactors()?;
            &default_wfactors
        }
    };
    debug!(
        "Cálculo de eficiencia energética: k_rdel={}, k_exp={}, {} vectores",
        k_rdel,
        k_exp,
        data.data.len()
    );

    let balance_cr = energy_balance(data, k_rdel)?;

    let mut weighted_cr = BTreeMap::new();
    let mut ep = WeightedEnergy::default();
    for (carrier, bal) in &balance_cr {
        let we_cr = weighted_energy_for_carrier(*carrier, &bal.annual, wfactors, k_exp)?;
        trace!("Energía ponderada {}: {:?}", carrier, we_cr);
        ep.EPpasoA += we_cr.we_A;
        ep.EP += we_cr.we;
        weighted_cr.insert(*carrier, we_cr);
    }
    debug!("EP(A): {}, EP(A+B): {}", ep.EPpasoA, ep.EP);

    Ok(EnergyPerformance {
        k_rdel,
        k_exp,
        balance_cr,
        weighted_cr,
        ep,
    })
}

/// Energía ponderada global (pasos A y A+B)
///
/// Shorthand for `energy_performance` returning the global result only.
pub fn weighted_energy(
    data: &EnergyData,
    k_rdel: f64,
    k_exp: f64,
    wfactors: Option<&Factors>,
) -> Result<WeightedEnergy> {
    energy_performance(data, k_rdel, k_exp, wfactors).map(|ep| ep.ep)
}

/// Pondera el balance anual de un vector energético
///
/// * `carrier` - energy carrier
/// * `annual` - annual balance by source and use
/// * `wfactors` - weighting factors
/// * `k_exp` - exported energy factor [0, 1]
///
/// # Errors
///
/// * Missing weighting factor for a source and use present in the annual balance
#[allow(non_snake_case)]
pub fn weighted_energy_for_carrier(
    carrier: Carrier,
    annual: &AnnualBalance,
    wfactors: &Factors,
    k_exp: f64,
) -> Result<WeightedEnergyForCarrier> {
    let mut we_delivered_A = RenNren::default();
    let mut we_exported_A = RenNren::default();
    let mut delta_B = RenNren::default();

    for (source, uses) in annual {
        for (dest, value) in uses {
            let fA = wfactors.find(carrier, *source, *dest, Step::A)?;
            match dest {
                Dest::input => we_delivered_A += fA * *value,
                Dest::to_nEPB | Dest::to_grid => {
                    we_exported_A += fA * *value;
                    let fB = wfactors.find(carrier, *source, *dest, Step::B)?;
                    delta_B += (fB - fA) * *value;
                }
            }
        }
    }

    let we_A = we_delivered_A - we_exported_A;
    let we_exported_AB = delta_B * k_exp;
    Ok(WeightedEnergyForCarrier {
        we_delivered_A,
        we_exported_A,
        we_A,
        we_exported_AB,
        we: we_A - we_exported_AB,
    })
}
