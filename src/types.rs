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
Tipos básicos
=============

Vectores energéticos, tipos y subtipos de componentes, fuentes, usos y pasos de cálculo,
metadatos, componentes energéticos y factores de paso.

Basic types: energy carriers, component types, sources, destinations, calculation steps,
metadata, energy components and weighting factors.
*/

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    error::{EpbdError, Result},
    rennren::RenNren,
};

// ==================== Common (carriers + weighting factors)

/// Vector energético (energy carrier).
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
pub enum Carrier {
    /// Electricity (mainland)
    ELECTRICIDAD,
    /// Electricity (Balearic Islands)
    ELECTRICIDADBALEARES,
    /// Electricity (Canary Islands)
    ELECTRICIDADCANARIAS,
    /// Electricity (Ceuta and Melilla)
    ELECTRICIDADCEUTAMELILLA,
    /// Environment thermal energy (heat pumps, solar thermal, ...)
    MEDIOAMBIENTE,
    /// Biofuel
    BIOCARBURANTE,
    /// Biomass
    BIOMASA,
    /// Densified biomass (pellets)
    BIOMASADENSIFICADA,
    /// Coal
    CARBON,
    /// Fuel oil
    FUELOIL,
    /// Natural gas
    GASNATURAL,
    /// Diesel oil
    GASOLEO,
    /// LPG - Liquefied petroleum gas
    GLP,
    /// Generic energy carrier 1 (district network)
    RED1,
    /// Generic energy carrier 2 (district network)
    RED2,
}

// ==================== Energy components

/// Tipo de componente energético: producción o consumo
///
/// Produced or used energy
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum CType {
    /// Produced energy
    PRODUCCION,
    /// Used energy
    CONSUMO,
}

/// Subtipo de componente: origen de la energía producida o uso de la consumida
///
/// Origin of produced energy or end use of used energy
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum CSubtype {
    /// On site generation (non cogeneration)
    INSITU,
    /// Cogeneration
    COGENERACION,
    /// EPB uses
    EPB,
    /// Non EPB uses
    NEPB,
}

// ==================== Weighting factors

/// Fuente de energía (origin of the energy)
///
/// `grid` is a pseudo-source for the energy delivered by the external grid.
/// Factor tables may also name it `RED`.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
pub enum Source {
    /// External grid
    #[strum(to_string = "grid", serialize = "RED")]
    #[serde(rename = "grid")]
    GRID,
    /// On site generation (non cogeneration)
    INSITU,
    /// Cogeneration
    COGENERACION,
}

impl TryFrom<CSubtype> for Source {
    type Error = EpbdError;

    fn try_from(value: CSubtype) -> Result<Self> {
        match value {
            CSubtype::INSITU => Ok(Source::INSITU),
            CSubtype::COGENERACION => Ok(Source::COGENERACION),
            _ => Err(EpbdError::MalformedInput(format!(
                "el subtipo {} no es un origen de producción",
                value
            ))),
        }
    }
}

/// Uso de la energía en el balance anual (destination)
#[allow(non_camel_case_types)]
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
pub enum Dest {
    /// Energy entering the assessment boundary (delivered or produced)
    input,
    /// Produced energy exported to non EPB uses
    to_nEPB,
    /// Produced energy exported to the grid
    to_grid,
}

/// Paso de cálculo (calculation step)
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum Step {
    /// Resources used (step A)
    A,
    /// Resources avoided by the grid through export (step B)
    B,
}

// ==================== Metadata

/// Metadatos de los componentes o de los factores de paso
///
/// Metadata of components or weighting factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// metadata name.
    pub key: String,
    /// metadata value
    pub value: String,
}

impl Meta {
    /// Metadata constructor
    pub fn new<T, U>(key: T, value: U) -> Self
    where
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Meta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#META {}: {}", self.key, self.value)
    }
}

impl FromStr for Meta {
    type Err = EpbdError;

    fn from_str(s: &str) -> Result<Meta> {
        let s = s.trim();
        let body = s
            .strip_prefix("#META")
            .ok_or_else(|| EpbdError::MalformedInput(format!("metadato no válido `{}`", s)))?;
        let items: Vec<&str> = body.splitn(2, ':').map(str::trim).collect();
        match items.as_slice() {
            [key, value] if !key.is_empty() => Ok(Meta::new(*key, *value)),
            _ => Err(EpbdError::MalformedInput(format!(
                "metadato no válido `{}`",
                s
            ))),
        }
    }
}

/// Gestión común de metadatos
pub trait MetaVec {
    /// Get vector of metadata
    fn get_metavec(&self) -> &Vec<Meta>;

    /// Get mutable vector of metadata
    fn get_mut_metavec(&mut self) -> &mut Vec<Meta>;

    /// Check if key is included in metadata
    fn has_meta(&self, key: &str) -> bool {
        self.get_metavec().iter().any(|m| m.key == key)
    }

    /// Get (optional) metadata value by key
    fn get_meta(&self, key: &str) -> Option<String> {
        self.get_metavec()
            .iter()
            .find(|m| m.key == key)
            .map(|v| v.value.clone())
    }

    /// Get (optional) metadata value by key as f64
    fn get_meta_f64(&self, key: &str) -> Option<f64> {
        self.get_metavec()
            .iter()
            .find(|m| m.key == key)
            .and_then(|v| f64::from_str(v.value.trim()).ok())
    }

    /// Get (optional) metadata value (f64, f64) by key as RenNren struct
    fn get_meta_rennren(&self, key: &str) -> Option<RenNren> {
        self.get_metavec()
            .iter()
            .find(|m| m.key == key)
            .and_then(|v| v.value.parse::<RenNren>().ok())
    }

    /// Update metadata value for key or insert new metadata.
    fn update_meta(&mut self, key: &str, value: &str) {
        let meta = self.get_mut_metavec();
        match meta.iter_mut().find(|m| m.key == key) {
            Some(m) => m.value = value.to_string(),
            None => meta.push(Meta::new(key, value)),
        }
    }
}

// ==================== Energy component

/// Componente energético: serie temporal de energía producida o consumida
///
/// Energy carrier component
///
/// `ELECTRICIDAD, CONSUMO, EPB, 16.39, 13.11, 8.20 # comentario`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Energy carrier
    pub carrier: Carrier,
    /// Produced or used energy
    pub ctype: CType,
    /// Origin of produced energy (INSITU, COGENERACION) or end use (EPB, NEPB)
    pub csubtype: CSubtype,
    /// Energy values, one per timestep
    pub values: Vec<f64>,
    /// Descriptive comment
    pub comment: String,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let valuelist = self
            .values
            .iter()
            .map(|v| format!("{:.2}", v))
            .join(", ");
        let comment = if !self.comment.is_empty() {
            format!(" # {}", self.comment)
        } else {
            "".to_owned()
        };
        write!(
            f,
            "{}, {}, {}, {}{}",
            self.carrier, self.ctype, self.csubtype, valuelist, comment
        )
    }
}

impl FromStr for Component {
    type Err = EpbdError;

    fn from_str(s: &str) -> Result<Component> {
        let items: Vec<&str> = s.trim().splitn(2, '#').map(str::trim).collect();
        let comment = items.get(1).unwrap_or(&"").to_string();
        let items: Vec<&str> = items[0].split(',').map(str::trim).collect();
        if items.len() < 4 {
            return Err(EpbdError::MalformedInput(format!(
                "componente sin valores o con campos insuficientes `{}`",
                s
            )));
        };
        let carrier: Carrier = items[0].parse()?;
        let ctype: CType = items[1].parse()?;
        let csubtype: CSubtype = items[2].parse()?;
        let values = items[3..]
            .iter()
            .map(|v| v.parse::<f64>())
            .collect::<std::result::Result<Vec<f64>, _>>()
            .map_err(|_| {
                EpbdError::MalformedInput(format!("valores no numéricos en `{}`", s))
            })?;
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(EpbdError::MalformedInput(format!(
                "los valores deben ser finitos y no negativos en `{}`",
                s
            )));
        }
        Ok(Component {
            carrier,
            ctype,
            csubtype,
            values,
            comment,
        })
    }
}

// ==================== Weighting factor

/// Factor de paso
///
/// Weighting factor for a carrier, source, destination and calculation step
///
/// `ELECTRICIDAD, grid, input, A, 0.341, 2.082 # comentario`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    /// Energy carrier
    pub carrier: Carrier,
    /// Energy source (grid, INSITU, COGENERACION)
    pub source: Source,
    /// Energy use (input, to_nEPB, to_grid)
    pub dest: Dest,
    /// Calculation step (A, B)
    pub step: Step,
    /// Renewable and non renewable factor values
    pub factors: RenNren,
    /// Descriptive comment
    pub comment: String,
}

impl Factor {
    /// Constructor
    pub fn new<T: Into<String>>(
        carrier: Carrier,
        source: Source,
        dest: Dest,
        step: Step,
        factors: RenNren,
        comment: T,
    ) -> Self {
        Self {
            carrier,
            source,
            dest,
            step,
            factors,
            comment: comment.into(),
        }
    }

    /// Does this factor match the given key?
    pub fn matches(&self, carrier: Carrier, source: Source, dest: Dest, step: Step) -> bool {
        self.carrier == carrier && self.source == source && self.dest == dest && self.step == step
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let comment = if !self.comment.is_empty() {
            format!(" # {}", self.comment)
        } else {
            "".to_owned()
        };
        write!(
            f,
            "{}, {}, {}, {}, {:.3}, {:.3}{}",
            self.carrier,
            self.source,
            self.dest,
            self.step,
            self.factors.ren,
            self.factors.nren,
            comment
        )
    }
}

impl FromStr for Factor {
    type Err = EpbdError;

    fn from_str(s: &str) -> Result<Factor> {
        let items: Vec<&str> = s.trim().splitn(2, '#').map(str::trim).collect();
        let comment = items.get(1).unwrap_or(&"").to_string();
        let items: Vec<&str> = items[0].split(',').map(str::trim).collect();
        if items.len() != 6 {
            return Err(EpbdError::MalformedInput(format!(
                "factor de paso con número de campos incorrecto `{}`",
                s
            )));
        };
        let carrier: Carrier = items[0].parse()?;
        let source: Source = items[1].parse()?;
        let dest: Dest = items[2].parse()?;
        let step: Step = items[3].parse()?;
        let ren: f64 = items[4].parse()?;
        let nren: f64 = items[5].parse()?;
        if !ren.is_finite() || !nren.is_finite() {
            return Err(EpbdError::MalformedInput(format!(
                "los factores de paso deben ser valores finitos en `{}`",
                s
            )));
        }
        Ok(Factor::new(
            carrier,
            source,
            dest,
            step,
            RenNren::new(ren, nren),
            comment,
        ))
    }
}

// ==================== Line classification

/// Is this a data line of an energy or weighting factor file?
///
/// Header rows (`vector,...`), comments and blank lines carry no data.
pub(crate) fn is_data_line(line: &str) -> bool {
    !(line.is_empty() || line.starts_with('#') || line.starts_with("vector,"))
}

/// Is this a metadata line?
pub(crate) fn is_meta_line(line: &str) -> bool {
    line.starts_with("#META")
}
