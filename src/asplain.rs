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
Salida de resultados
====================

Indicadores de eficiencia energética por unidad de área de referencia y su
representación en formato simple (texto) y JSON.
*/

use serde::{Deserialize, Serialize};

use crate::{
    error::{EpbdError, Result},
    performance::WeightedEnergy,
};

/// Muestra en formato simple
///
/// Esta función usa un formato simple y compacto para representar la información sobre
/// eficiencia energética del edificio
pub trait AsPlain {
    /// Get in plain format
    fn to_plain(&self) -> String;
}

/// Indicadores de eficiencia energética por unidad de área de referencia
///
/// Energy performance indicators (step A and step A+B) per unit of reference area
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// Renewable weighted energy, step A
    pub EPAren: f64,
    /// Non renewable weighted energy, step A
    pub EPAnren: f64,
    /// Total weighted energy, step A
    pub EPAtotal: f64,
    /// Renewable energy ratio, step A
    pub EPArer: f64,
    /// Renewable weighted energy, step A+B
    pub EPren: f64,
    /// Non renewable weighted energy, step A+B
    pub EPnren: f64,
    /// Total weighted energy, step A+B
    pub EPtotal: f64,
    /// Renewable energy ratio, step A+B
    pub EPrer: f64,
}

impl Indicators {
    /// Indicadores a partir de la energía ponderada y el área de referencia
    ///
    /// # Errors
    ///
    /// * Use of an `arearef` less than 1e-3
    pub fn from_weighted(ep: &WeightedEnergy, arearef: f64) -> Result<Self> {
        if !(arearef > 1e-3) {
            return Err(EpbdError::WrongInput(format!(
                "el área de referencia no puede ser nula o casi nula y se encontró {}",
                arearef
            )));
        };
        Ok(Self::scaled(ep, 1.0 / arearef))
    }

    // Valores por unidad de área, con k_area = 1 / arearef
    fn scaled(ep: &WeightedEnergy, k_area: f64) -> Self {
        let a = k_area * ep.EPpasoA;
        let b = k_area * ep.EP;
        Self {
            EPAren: a.ren,
            EPAnren: a.nren,
            EPAtotal: a.tot(),
            EPArer: a.rer(),
            EPren: b.ren,
            EPnren: b.nren,
            EPtotal: b.tot(),
            EPrer: b.rer(),
        }
    }
}

impl AsPlain for Indicators {
    fn to_plain(&self) -> String {
        format!(
            "EP(step A)  , ren ={:>8.1}, nren={:>8.1}, tot ={:>8.1}, RER ={:>8.2}
EP(step A+B), ren ={:>8.1}, nren={:>8.1}, tot ={:>8.1}, RER ={:>8.2}
",
            self.EPAren,
            self.EPAnren,
            self.EPAtotal,
            self.EPArer,
            self.EPren,
            self.EPnren,
            self.EPtotal,
            self.EPrer
        )
    }
}

impl AsPlain for WeightedEnergy {
    /// Valores absolutos (área de referencia unitaria)
    fn to_plain(&self) -> String {
        Indicators::scaled(self, 1.0).to_plain()
    }
}
