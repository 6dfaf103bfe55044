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
Errores
=======

Tipos de error de la librería.
*/

use thiserror::Error;

/// Error de la librería
///
/// Library error type
#[derive(Debug, Error)]
pub enum EpbdError {
    /// Datos de entrada mal formados (vectores, tipos, valores o longitudes)
    #[error("Formato de datos incorrecto: {0}")]
    MalformedInput(String),
    /// Falta un factor de paso necesario para el cálculo
    #[error("No se encuentra el factor de paso {0}")]
    MissingFactor(String),
    /// Parámetro fuera de rango
    #[error("Dato de entrada incorrecto: {0}")]
    WrongInput(String),
}

/// Resultado con error de la librería
pub type Result<T> = std::result::Result<T, EpbdError>;

impl From<std::num::ParseFloatError> for EpbdError {
    fn from(err: std::num::ParseFloatError) -> Self {
        EpbdError::MalformedInput(format!("valor numérico no válido ({})", err))
    }
}

impl From<strum::ParseError> for EpbdError {
    fn from(err: strum::ParseError) -> Self {
        EpbdError::MalformedInput(format!("etiqueta no reconocida ({})", err))
    }
}
