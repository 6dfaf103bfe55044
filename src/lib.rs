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
epbdrs
======

This crate provides a library and binary that compute the **energy balance and weighted
energy of buildings** following the ISO/DIS 52000-1 (EN 15603) procedure, from time series
of used and produced energy for each energy carrier.

The balance apportions on site (INSITU) and cogeneration (COGENERACION) production to EPB
uses, non EPB uses and the grid, redelivers part of the excess energy to unfilled EPB uses
(redelivery factor k_rdel) and weights the annual results with renewable and non renewable
weighting factors in two calculation steps: A (resources used) and B (resources saved by
the grid thanks to exported energy, scaled by the export factor k_exp).

It also holds the following assumptions:

- constant weighting factors through all timesteps
- no priority is defined for energy production (exports are apportioned to sources
  according to their production)
- on-site produced energy is compensated on a carrier basis

Este *crate* proporciona una biblioteca y un programa que calculan el **balance de energía
final y la energía ponderada de los edificios** según la ISO/DIS 52000-1 (EN 15603), a partir
de las series temporales de energía consumida y producida para cada vector energético.

Adopta la nomenclatura y los valores por defecto del Código Técnico de la Edificación (CTE DB-HE).

# Ejemplo

```rust
use epbdrs::*;

// datos energéticos
let data: EnergyData = "vector,tipo,src_dst
ELECTRICIDAD,CONSUMO,EPB,16.39,13.11,8.20,7.38,4.10,4.92,6.56,5.74,4.10,6.56,9.84,13.11
ELECTRICIDAD,PRODUCCION,INSITU,8.20,6.56,4.10,3.69,2.05,2.46,3.28,2.87,2.05,3.28,4.92,6.56"
    .parse()
    .unwrap();

// factores de paso reglamentarios
let fp = cte::default_wfactors().unwrap();

// balance y energía ponderada según EN ISO 52000-1
let ep = energy_performance(&data, cte::K_RDEL_DEFAULT, cte::K_EXP_DEFAULT, Some(&fp)).unwrap();

// indicadores por unidad de área de referencia
let indicators = Indicators::from_weighted(&ep.ep, 1.0).unwrap();
println!("{}", indicators.to_plain());
```
*/

#![deny(missing_docs)]

mod asplain;
mod balance;
mod components;
mod energydata;
mod performance;
mod rennren;
mod wfactors;

pub mod cte;
pub mod error;
pub mod types;
pub mod vecops;

pub use asplain::*;
pub use balance::*;
pub use components::*;
pub use energydata::*;
pub use performance::*;
pub use rennren::*;
pub use types::MetaVec;
pub use wfactors::*;

/// Número de versión de la librería
///
/// Version number
pub static VERSION: &str = env!("CARGO_PKG_VERSION");
