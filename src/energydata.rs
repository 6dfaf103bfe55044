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
Datos energéticos por vector
============================

Organiza los componentes energéticos por vector energético, con las series de consumo
EPB y no EPB y las series de producción por origen, comprobando su coherencia.

Energy data by carrier (EPB use, non EPB use and production by source).
*/

use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    components::Components,
    error::{EpbdError, Result},
    types::{CSubtype, CType, Carrier, Source},
    vecops::vecvecsum,
};

/// Orígenes de producción admitidos por defecto
pub const DEFAULT_SOURCES: [Source; 2] = [Source::INSITU, Source::COGENERACION];

/// Series temporales de un vector energético
///
/// Time series of energy use and production for a single carrier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierData {
    /// Energy used for EPB uses in each timestep
    pub epb: Vec<f64>,
    /// Energy used for non EPB uses in each timestep
    pub nepb: Vec<f64>,
    /// Energy produced in each timestep, by source
    pub production: BTreeMap<Source, Vec<f64>>,
}

impl CarrierData {
    fn zeros(numsteps: usize, sources: &[Source]) -> Self {
        Self {
            epb: vec![0.0; numsteps],
            nepb: vec![0.0; numsteps],
            production: sources
                .iter()
                .map(|s| (*s, vec![0.0; numsteps]))
                .collect(),
        }
    }
}

/// Datos energéticos de todos los vectores
///
/// Every time series shares the same length, `numsteps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyData {
    /// Number of calculation steps
    pub numsteps: usize,
    /// Energy data by carrier
    pub data: BTreeMap<Carrier, CarrierData>,
}

impl EnergyData {
    /// Organiza los componentes por vector usando los orígenes de producción por defecto
    pub fn from_components(components: &Components) -> Result<Self> {
        Self::from_components_with_sources(components, &DEFAULT_SOURCES)
    }

    /// Organiza los componentes por vector energético
    ///
    /// * `components` - energy components
    /// * `sources` - production sources accepted in this run
    ///
    /// The first component fixes the number of steps. Repeated components for the same
    /// carrier and use (or source) are added. Missing series are filled with zeros.
    ///
    /// # Errors
    ///
    /// * Components with a number of values different to that of the first one
    /// * Used energy with a subtype other than EPB or NEPB
    /// * Produced energy with a subtype that is not an accepted source
    pub fn from_components_with_sources(
        components: &Components,
        sources: &[Source],
    ) -> Result<Self> {
        let numsteps = components
            .cdata
            .first()
            .map(|c| c.values.len())
            .unwrap_or(0);

        let mut data: BTreeMap<Carrier, CarrierData> = BTreeMap::new();
        for (idx, comp) in components.cdata.iter().enumerate() {
            if comp.values.len() != numsteps {
                return Err(EpbdError::MalformedInput(format!(
                    "todos los componentes deben tener {} valores y el componente {} tiene {} (`{}`)",
                    numsteps,
                    idx + 1,
                    comp.values.len(),
                    comp
                )));
            }
            let crdata = data
                .entry(comp.carrier)
                .or_insert_with(|| CarrierData::zeros(numsteps, sources));
            let target = match (comp.ctype, comp.csubtype) {
                (CType::CONSUMO, CSubtype::EPB) => &mut crdata.epb,
                (CType::CONSUMO, CSubtype::NEPB) => &mut crdata.nepb,
                (CType::PRODUCCION, subtype @ CSubtype::INSITU)
                | (CType::PRODUCCION, subtype @ CSubtype::COGENERACION) => {
                    let source = Source::try_from(subtype)?;
                    if !sources.contains(&source) {
                        return Err(EpbdError::MalformedInput(format!(
                            "origen de producción {} no admitido en el componente {} (`{}`)",
                            source,
                            idx + 1,
                            comp
                        )));
                    }
                    crdata
                        .production
                        .entry(source)
                        .or_insert_with(|| vec![0.0; numsteps])
                }
                (ctype, csubtype) => {
                    return Err(EpbdError::MalformedInput(format!(
                        "combinación de tipo {} y subtipo {} no válida en el componente {} (`{}`)",
                        ctype,
                        csubtype,
                        idx + 1,
                        comp
                    )))
                }
            };
            *target = vecvecsum(target, &comp.values);
        }
        debug!(
            "Datos energéticos: {} vectores, {} pasos de cálculo",
            data.len(),
            numsteps
        );
        Ok(Self { numsteps, data })
    }
}

impl FromStr for EnergyData {
    type Err = EpbdError;

    fn from_str(s: &str) -> Result<EnergyData> {
        let components: Components = s.parse()?;
        EnergyData::from_components(&components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DATA1: &str = "vector,tipo,src_dst
ELECTRICIDAD,CONSUMO,EPB,10,20,30
ELECTRICIDAD,CONSUMO,EPB,1,1,1
ELECTRICIDAD,PRODUCCION,INSITU,5,5,5
GASNATURAL,CONSUMO,NEPB,3,3,3";

    #[test]
    fn energydata_aggregates_and_fills() {
        let ed: EnergyData = DATA1.parse().unwrap();
        assert_eq!(ed.numsteps, 3);
        let el = &ed.data[&Carrier::ELECTRICIDAD];
        assert_eq!(el.epb, vec![11.0, 21.0, 31.0]);
        assert_eq!(el.nepb, vec![0.0, 0.0, 0.0]);
        assert_eq!(el.production[&Source::INSITU], vec![5.0, 5.0, 5.0]);
        assert_eq!(el.production[&Source::COGENERACION], vec![0.0, 0.0, 0.0]);
        let gas = &ed.data[&Carrier::GASNATURAL];
        assert_eq!(gas.epb, vec![0.0, 0.0, 0.0]);
        assert_eq!(gas.nepb, vec![3.0, 3.0, 3.0]);
    }

    #[test]
    fn energydata_ragged_lengths() {
        let err = "ELECTRICIDAD,CONSUMO,EPB,1,2,3\nGASNATURAL,CONSUMO,EPB,1,2"
            .parse::<EnergyData>()
            .unwrap_err();
        assert!(matches!(err, EpbdError::MalformedInput(_)));
    }

    #[test]
    fn energydata_wrong_subtype() {
        assert!("ELECTRICIDAD,CONSUMO,INSITU,1,2,3"
            .parse::<EnergyData>()
            .is_err());
        assert!("ELECTRICIDAD,PRODUCCION,EPB,1,2,3"
            .parse::<EnergyData>()
            .is_err());
    }

    #[test]
    fn energydata_source_allow_list() {
        let comps: Components = "ELECTRICIDAD,PRODUCCION,COGENERACION,1,2,3"
            .parse()
            .unwrap();
        assert!(EnergyData::from_components(&comps).is_ok());
        let err = EnergyData::from_components_with_sources(&comps, &[Source::INSITU]).unwrap_err();
        assert!(matches!(err, EpbdError::MalformedInput(_)));
    }

    #[test]
    fn energydata_empty() {
        let ed: EnergyData = "vector,tipo,src_dst\n".parse().unwrap();
        assert_eq!(ed.numsteps, 0);
        assert!(ed.data.is_empty());
    }
}
