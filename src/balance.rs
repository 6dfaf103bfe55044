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
Balance energético por vector
=============================

Balance de energía final, paso a paso, para cada vector energético según la
EN ISO 52000-1 (EN 15603): energía producida y autoconsumida, exportada a usos no EPB
y a la red, redistribuida (factor de redistribución k_rdel) y suministrada por la red.

Toda la energía exportada se imputa a sus orígenes de producción de forma proporcional
a su producción en cada paso de cálculo. Los resultados anuales se agregan por origen
y uso, descartando los valores no significativos.
*/

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    energydata::{CarrierData, EnergyData},
    error::{EpbdError, Result},
    types::{Carrier, Dest, Source},
    vecops::{
        safe_ratio, veckmul, veclistsum, vecsum, vecvecdif, vecvecmin, vecvecmul, vecvecratio,
    },
};

/// Umbral de significación de los valores anuales del balance
///
/// Annual values with an absolute value not above this threshold are discarded.
pub const ANNUAL_THRESHOLD: f64 = 0.1;

/// Balance anual por origen y uso de la energía
///
/// Annual energy by source (grid, INSITU, COGENERACION) and use (input, to_nEPB, to_grid)
pub type AnnualBalance = BTreeMap<Source, BTreeMap<Dest, f64>>;

/// Resultados detallados del balance energético para un vector energético
///
/// Detailed timestep results of the energy balance for a given carrier
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceForCarrier {
    /// Energy carrier
    pub carrier: Carrier,
    /// Energy used for EPB uses in each timestep
    pub used_EPB: Vec<f64>,
    /// Energy used for non EPB uses in each timestep
    pub used_nEPB: Vec<f64>,
    /// Produced energy (all sources) in each timestep
    pub produced: Vec<f64>,
    /// Produced energy in each timestep, by source
    pub produced_bysrc: BTreeMap<Source, Vec<f64>>,
    /// Produced energy used for EPB uses (self consumed) in each timestep
    pub produced_used_EPus: Vec<f64>,
    /// Exportable energy (produced and not self consumed) in each timestep
    pub exported: Vec<f64>,
    /// Exportable energy in each timestep, by source
    pub exported_bysrc: BTreeMap<Source, Vec<f64>>,
    /// Exported energy used for non EPB uses in each timestep
    pub exported_nEPB: Vec<f64>,
    /// Exported energy used for non EPB uses in each timestep, by source
    pub exported_nEPB_bysrc: BTreeMap<Source, Vec<f64>>,
    /// Exported energy not used on site (excess) in each timestep
    pub exported_excess: Vec<f64>,
    /// Exported energy not used on site in each timestep, by source
    pub exported_excess_bysrc: BTreeMap<Source, Vec<f64>>,
    /// EPB energy use not covered by self consumption in each timestep
    pub unfilled_EPB: Vec<f64>,
    /// Annually redelivered energy
    pub redelivered_an: f64,
    /// Excess energy collected for redelivery in each timestep
    pub redelivered_collected: Vec<f64>,
    /// Redelivered energy serving EPB uses in each timestep
    pub redelivered_served: Vec<f64>,
    /// Delivered energy by the grid in each timestep
    pub delivered_grid: Vec<f64>,
    /// Exported energy to the grid in each timestep
    pub exported_grid: Vec<f64>,
    /// Exported energy to the grid in each timestep, by source
    pub exported_grid_bysrc: BTreeMap<Source, Vec<f64>>,
    /// Annual balance by source and use
    pub annual: AnnualBalance,
}

/// Calcula el balance energético de todos los vectores
///
/// Compute the energy balance for every carrier in `data`.
///
/// * `data` - energy data by carrier
/// * `k_rdel` - redelivery factor [0, 1]
///
/// # Errors
///
/// * `k_rdel` outside [0, 1]
pub fn energy_balance(
    data: &EnergyData,
    k_rdel: f64,
) -> Result<BTreeMap<Carrier, BalanceForCarrier>> {
    check_k("k_rdel", k_rdel)?;
    Ok(data
        .data
        .iter()
        .map(|(carrier, crdata)| (*carrier, balance_for_carrier(*carrier, crdata, k_rdel)))
        .collect())
}

/// Comprueba que un coeficiente está en el rango [0, 1]
pub(crate) fn check_k(name: &str, k: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&k) {
        return Err(EpbdError::WrongInput(format!(
            "el factor {} debe estar entre 0.00 y 1.00 y vale {}",
            name, k
        )));
    }
    Ok(())
}

/// Calcula el balance energético para un vector energético
///
/// Calculate the timestep and annual energy balance of a carrier.
///
/// * `carrier` - energy carrier
/// * `crdata` - energy use and production series of the carrier
/// * `k_rdel` - redelivery factor [0, 1]
#[allow(non_snake_case)]
pub fn balance_for_carrier(carrier: Carrier, crdata: &CarrierData, k_rdel: f64) -> BalanceForCarrier {
    let E_EPus_t = &crdata.epb;
    let E_nEPus_t = &crdata.nepb;
    let E_pr_i_t = &crdata.production;
    let sources: Vec<Source> = E_pr_i_t.keys().cloned().collect();

    // * Produced energy from all sources
    let E_pr_t = if E_pr_i_t.is_empty() {
        vec![0.0; E_EPus_t.len()]
    } else {
        veclistsum(&E_pr_i_t.values().map(|v| v.as_slice()).collect::<Vec<_>>())
    };

    // * Produced energy used for EPB uses (self consumption)
    let E_pr_used_EPus_t = vecvecmin(E_EPus_t, &E_pr_t);

    // * Exportable energy (produced and not self consumed)
    let E_exp_t = vecvecdif(&E_pr_t, &E_pr_used_EPus_t);

    // * Exportable energy by source, proportional to its production
    // E_exp_i_t = E_pr_i_t * (1 - E_pr_used_EPus_t / E_pr_t)
    let f_exp_t: Vec<f64> = vecvecratio(&E_pr_used_EPus_t, &E_pr_t)
        .iter()
        .map(|f| 1.0 - f)
        .collect();
    let E_exp_i_t: BTreeMap<Source, Vec<f64>> = sources
        .iter()
        .map(|s| (*s, vecvecmul(&E_pr_i_t[s], &f_exp_t)))
        .collect();

    // * Exported energy used for non EPB uses
    let E_exp_used_nEPus_t = vecvecmin(&E_exp_t, E_nEPus_t);
    let f_nEPus_t = vecvecratio(&E_exp_used_nEPus_t, &E_exp_t);
    let E_exp_used_nEPus_i_t: BTreeMap<Source, Vec<f64>> = sources
        .iter()
        .map(|s| (*s, vecvecmul(&E_exp_i_t[s], &f_nEPus_t)))
        .collect();

    // * Exported energy not used on site (excess)
    let E_exc_t = vecvecdif(&E_exp_t, &E_exp_used_nEPus_t);
    let f_exc_t = vecvecratio(&E_exc_t, &E_exp_t);
    let E_exc_i_t: BTreeMap<Source, Vec<f64>> = sources
        .iter()
        .map(|s| (*s, vecvecmul(&E_exp_i_t[s], &f_exc_t)))
        .collect();

    // * EPB use not covered by self consumption
    let E_unf_EPus_t = vecvecdif(E_EPus_t, &E_pr_used_EPus_t);

    // * Redelivery of annual excess to unfilled EPB use
    let E_exc_an = vecsum(&E_exc_t);
    let E_unf_EPus_an = vecsum(&E_unf_EPus_t);
    let E_rdel_an = k_rdel * E_unf_EPus_an.min(E_exc_an);
    let E_rdel_collected_t = veckmul(&E_exc_t, safe_ratio(E_rdel_an, E_exc_an));
    let E_rdel_served_t = veckmul(&E_unf_EPus_t, safe_ratio(E_rdel_an, E_unf_EPus_an));

    // * Delivered energy by the grid
    let E_del_grid_t = vecvecdif(&E_unf_EPus_t, &E_rdel_served_t);

    // * Exported energy to the grid, by source
    // The annual share of non redelivered excess applies to every timestep
    let f_exp_grid_an = safe_ratio(E_exc_an - E_rdel_an, E_exc_an);
    let E_exp_grid_i_t: BTreeMap<Source, Vec<f64>> = sources
        .iter()
        .map(|s| (*s, veckmul(&E_exc_i_t[s], f_exp_grid_an)))
        .collect();
    let E_exp_grid_t = veckmul(&E_exc_t, f_exp_grid_an);

    // * Annual balance by source and use
    let mut annual = AnnualBalance::new();
    for s in &sources {
        let uses = [
            (Dest::input, vecsum(&E_pr_i_t[s])),
            (Dest::to_nEPB, vecsum(&E_exp_used_nEPus_i_t[s])),
            (Dest::to_grid, vecsum(&E_exp_grid_i_t[s])),
        ];
        insert_significant(&mut annual, *s, &uses);
    }
    insert_significant(
        &mut annual,
        Source::GRID,
        &[(Dest::input, vecsum(&E_del_grid_t))],
    );

    debug!(
        "Balance anual {}: redistribuida {:.3}, {:?}",
        carrier, E_rdel_an, annual
    );

    BalanceForCarrier {
        carrier,
        used_EPB: E_EPus_t.clone(),
        used_nEPB: E_nEPus_t.clone(),
        produced: E_pr_t,
        produced_bysrc: E_pr_i_t.clone(),
        produced_used_EPus: E_pr_used_EPus_t,
        exported: E_exp_t,
        exported_bysrc: E_exp_i_t,
        exported_nEPB: E_exp_used_nEPus_t,
        exported_nEPB_bysrc: E_exp_used_nEPus_i_t,
        exported_excess: E_exc_t,
        exported_excess_bysrc: E_exc_i_t,
        unfilled_EPB: E_unf_EPus_t,
        redelivered_an: E_rdel_an,
        redelivered_collected: E_rdel_collected_t,
        redelivered_served: E_rdel_served_t,
        delivered_grid: E_del_grid_t,
        exported_grid: E_exp_grid_t,
        exported_grid_bysrc: E_exp_grid_i_t,
        annual,
    }
}

// Keep only values above the significance threshold
fn insert_significant(annual: &mut AnnualBalance, source: Source, uses: &[(Dest, f64)]) {
    let kept: BTreeMap<Dest, f64> = uses
        .iter()
        .filter(|(_, v)| v.abs() > ANNUAL_THRESHOLD)
        .cloned()
        .collect();
    if !kept.is_empty() {
        annual.insert(source, kept);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PERFILC100: [f64; 12] = [
        16.39, 13.11, 8.20, 7.38, 4.10, 4.92, 6.56, 5.74, 4.10, 6.56, 9.84, 13.11,
    ];
    const PERFILC50: [f64; 12] = [
        8.20, 6.56, 4.10, 3.69, 2.05, 2.46, 3.28, 2.87, 2.05, 3.28, 4.92, 6.56,
    ];

    fn crdata(epb: &[f64], nepb: &[f64], insitu: &[f64], cogen: &[f64]) -> CarrierData {
        let mut production = BTreeMap::new();
        production.insert(Source::INSITU, insitu.to_vec());
        production.insert(Source::COGENERACION, cogen.to_vec());
        CarrierData {
            epb: epb.to_vec(),
            nepb: nepb.to_vec(),
            production,
        }
    }

    fn annual(bal: &BalanceForCarrier, source: Source, dest: Dest) -> f64 {
        bal.annual
            .get(&source)
            .and_then(|m| m.get(&dest))
            .cloned()
            .unwrap_or(0.0)
    }

    fn assert_conservation(bal: &BalanceForCarrier) {
        for i in 0..bal.used_EPB.len() {
            let epb = bal.produced_used_EPus[i] + bal.redelivered_served[i] + bal.delivered_grid[i];
            assert!((bal.used_EPB[i] - epb).abs() < 1e-6);
            let prod = bal.produced_used_EPus[i]
                + bal.exported_nEPB[i]
                + bal.redelivered_collected[i]
                + bal.exported_grid[i];
            assert!((bal.produced[i] - prod).abs() < 1e-6);
            let exp_by_src: f64 = bal.exported_bysrc.values().map(|v| v[i]).sum();
            assert!((bal.exported[i] - exp_by_src).abs() < 1e-6);
        }
        let collected: f64 = bal.redelivered_collected.iter().sum();
        let served: f64 = bal.redelivered_served.iter().sum();
        assert!((collected - bal.redelivered_an).abs() < 1e-6);
        assert!((served - bal.redelivered_an).abs() < 1e-6);
    }

    #[test]
    fn balance_no_production() {
        let zeros = [0.0; 12];
        let bal = balance_for_carrier(
            Carrier::ELECTRICIDAD,
            &crdata(&PERFILC100, &zeros, &zeros, &zeros),
            1.0,
        );
        assert_conservation(&bal);
        assert_eq!(bal.delivered_grid, PERFILC100.to_vec());
        assert_eq!(bal.redelivered_an, 0.0);
        assert_eq!(bal.annual.len(), 1);
        assert!((annual(&bal, Source::GRID, Dest::input) - 100.01).abs() < 1e-6);
    }

    #[test]
    fn balance_partial_self_consumption() {
        let zeros = [0.0; 12];
        let bal = balance_for_carrier(
            Carrier::ELECTRICIDAD,
            &crdata(&PERFILC100, &zeros, &PERFILC50, &zeros),
            1.0,
        );
        assert_conservation(&bal);
        assert!((annual(&bal, Source::INSITU, Dest::input) - 50.02).abs() < 1e-6);
        assert!((annual(&bal, Source::GRID, Dest::input) - 49.99).abs() < 1e-6);
        // No export: no to_grid or to_nEPB annual values
        assert!(bal.annual[&Source::INSITU].get(&Dest::to_grid).is_none());
        assert!(bal.annual.get(&Source::COGENERACION).is_none());
    }

    #[test]
    fn balance_excess_and_redelivery() {
        let epb = [10.0, 10.0, 0.0, 0.0];
        let nepb = [0.0, 0.0, 2.0, 0.0];
        let insitu = [0.0, 0.0, 12.0, 12.0];
        let bal_rdel = balance_for_carrier(
            Carrier::ELECTRICIDAD,
            &crdata(&epb, &nepb, &insitu, &[0.0; 4]),
            1.0,
        );
        assert_conservation(&bal_rdel);
        // Excess 10 + 12 = 22, unfilled 20 -> redelivered 20
        assert!((bal_rdel.redelivered_an - 20.0).abs() < 1e-9);
        assert!((annual(&bal_rdel, Source::INSITU, Dest::to_nEPB) - 2.0).abs() < 1e-9);
        assert!((annual(&bal_rdel, Source::INSITU, Dest::to_grid) - 2.0).abs() < 1e-9);
        assert_eq!(annual(&bal_rdel, Source::GRID, Dest::input), 0.0);

        let bal_nordel = balance_for_carrier(
            Carrier::ELECTRICIDAD,
            &crdata(&epb, &nepb, &insitu, &[0.0; 4]),
            0.0,
        );
        assert_conservation(&bal_nordel);
        assert_eq!(bal_nordel.redelivered_an, 0.0);
        assert!((annual(&bal_nordel, Source::INSITU, Dest::to_grid) - 22.0).abs() < 1e-9);
        assert!((annual(&bal_nordel, Source::GRID, Dest::input) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn balance_proportional_sources() {
        // Equal production from both sources splits exports evenly
        let bal = balance_for_carrier(
            Carrier::ELECTRICIDAD,
            &crdata(&[4.0, 4.0], &[2.0, 2.0], &[5.0, 5.0], &[5.0, 5.0]),
            0.0,
        );
        assert_conservation(&bal);
        assert_eq!(
            annual(&bal, Source::INSITU, Dest::to_grid),
            annual(&bal, Source::COGENERACION, Dest::to_grid)
        );
        assert!((annual(&bal, Source::INSITU, Dest::to_nEPB) - 2.0).abs() < 1e-9);
        assert!((annual(&bal, Source::COGENERACION, Dest::to_grid) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn balance_threshold() {
        let bal = balance_for_carrier(
            Carrier::ELECTRICIDAD,
            &crdata(&[0.05, 0.04], &[0.0, 0.0], &[0.0, 0.0], &[0.0, 0.0]),
            1.0,
        );
        assert!(bal.annual.is_empty());

        // Exactly at the threshold is discarded
        let bal = balance_for_carrier(
            Carrier::ELECTRICIDAD,
            &crdata(&[0.05, 0.05], &[0.0, 0.0], &[0.0, 0.0], &[0.0, 0.0]),
            1.0,
        );
        assert!(bal.annual.is_empty());

        // Just above the threshold is kept
        let bal = balance_for_carrier(
            Carrier::ELECTRICIDAD,
            &crdata(&[0.06, 0.05], &[0.0, 0.0], &[0.0, 0.0], &[0.0, 0.0]),
            1.0,
        );
        assert_eq!(bal.annual.len(), 1);
        assert!((annual(&bal, Source::GRID, Dest::input) - 0.11).abs() < 1e-9);
        assert!(!bal.annual.contains_key(&Source::INSITU));
    }

    #[test]
    fn balance_k_rdel_range() {
        let ed: EnergyData = "ELECTRICIDAD,CONSUMO,EPB,1,2".parse().unwrap();
        assert!(energy_balance(&ed, 1.5).is_err());
        assert!(energy_balance(&ed, -0.1).is_err());
        assert!(energy_balance(&ed, f64::NAN).is_err());
        assert_eq!(energy_balance(&ed, 0.5).unwrap().len(), 1);
    }
}
