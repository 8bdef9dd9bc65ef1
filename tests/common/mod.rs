//! A native problem that plays back scripted codes and records every call it receives.
#![allow(dead_code)]

use std::path::Path;

use glpk_core::{ColumnKind, Direction, FileFormat, NativeProblem, PhaseParams, ProblemData};

/// Codes and values returned by [ScriptedProblem]
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub simplex_return: i32,
    pub lp_status: i32,
    pub intopt_return: i32,
    pub mip_status: i32,
    pub lp_objective: f64,
    pub mip_objective: f64,
    pub read_return: i32,
    pub write_return: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedProblem {
    pub script: Script,
    pub calls: Vec<String>,
    pub phase_params: Vec<PhaseParams>,
    pub rows: usize,
    pub cols: usize,
    pub kinds: Vec<i32>,
    pub col_bounds: Vec<(i32, f64, f64)>,
    pub row_bounds: Vec<(i32, f64, f64)>,
    pub direction: i32,
}

impl ScriptedProblem {
    pub fn new(script: Script) -> Self {
        ScriptedProblem {
            script,
            ..ScriptedProblem::default()
        }
    }

    pub fn called(&self, name: &str) -> bool {
        self.calls.iter().any(|c| c == name)
    }

    fn record(&mut self, name: &str) {
        self.calls.push(name.to_string());
    }
}

impl NativeProblem for ScriptedProblem {
    fn erase(&mut self) {
        self.record("erase");
        self.rows = 0;
        self.cols = 0;
        self.kinds.clear();
        self.col_bounds.clear();
        self.row_bounds.clear();
    }

    fn add_rows(&mut self, count: usize) {
        self.record("add_rows");
        self.rows += count;
        self.row_bounds.resize(self.rows, (1, 0., 0.));
    }

    fn add_cols(&mut self, count: usize) {
        self.record("add_cols");
        self.cols += count;
        self.kinds.resize(self.cols, ColumnKind::Continuous.code());
        self.col_bounds.resize(self.cols, (5, 0., 0.));
    }

    fn set_obj_dir(&mut self, direction: i32) {
        self.record("set_obj_dir");
        self.direction = direction;
    }

    fn set_obj_coef(&mut self, _col: usize, _coef: f64) {
        self.record("set_obj_coef");
    }

    fn load_matrix(&mut self, _rows: &[usize], _cols: &[usize], _values: &[f64]) {
        self.record("load_matrix");
    }

    fn set_col_kind(&mut self, col: usize, kind: i32) {
        self.record("set_col_kind");
        self.kinds[col] = kind;
    }

    fn set_col_bounds(&mut self, col: usize, kind: i32, lower: f64, upper: f64) {
        self.record("set_col_bounds");
        self.col_bounds[col] = (kind, lower, upper);
    }

    fn set_row_bounds(&mut self, row: usize, kind: i32, lower: f64, upper: f64) {
        self.record("set_row_bounds");
        self.row_bounds[row] = (kind, lower, upper);
    }

    fn num_rows(&self) -> usize {
        self.rows
    }

    fn num_cols(&self) -> usize {
        self.cols
    }

    fn num_int(&self) -> usize {
        self.kinds
            .iter()
            .filter(|&&k| k != ColumnKind::Continuous.code())
            .count()
    }

    fn read(&mut self, _path: &Path, _format: FileFormat) -> i32 {
        self.record("read");
        if self.script.read_return == 0 {
            self.rows = 1;
            self.cols = 1;
        }
        self.script.read_return
    }

    fn write(&self, _path: &Path, _format: FileFormat) -> i32 {
        self.script.write_return
    }

    fn simplex(&mut self, params: &PhaseParams) -> i32 {
        self.record("simplex");
        self.phase_params.push(*params);
        self.script.simplex_return
    }

    fn intopt(&mut self, params: &PhaseParams) -> i32 {
        self.record("intopt");
        self.phase_params.push(*params);
        self.script.intopt_return
    }

    fn lp_status(&self) -> i32 {
        self.script.lp_status
    }

    fn lp_obj_val(&self) -> f64 {
        self.script.lp_objective
    }

    fn row_prim(&self, row: usize) -> f64 {
        row as f64
    }

    fn row_dual(&self, row: usize) -> f64 {
        -(row as f64)
    }

    fn col_prim(&self, col: usize) -> f64 {
        col as f64 + 0.5
    }

    fn col_dual(&self, col: usize) -> f64 {
        -(col as f64)
    }

    fn mip_status(&self) -> i32 {
        self.script.mip_status
    }

    fn mip_obj_val(&self) -> f64 {
        self.script.mip_objective
    }

    fn mip_row_val(&self, row: usize) -> f64 {
        row as f64 * 10.
    }

    fn mip_col_val(&self, col: usize) -> f64 {
        col as f64
    }
}

/// minimize 8x + 10y subject to 2x + 2y >= 7, 3x + 4y >= 12, 2x + y >= 6, x, y >= 0
pub fn diet(kind: ColumnKind) -> ProblemData {
    ProblemData {
        direction: Direction::Minimize,
        objective: vec![8., 10.],
        row_indices: vec![0, 1, 2, 0, 1, 2],
        col_indices: vec![0, 0, 0, 1, 1, 1],
        values: vec![2., 3., 2., 2., 4., 1.],
        column_kinds: vec![kind; 2],
        column_lower: vec![0., 0.],
        column_upper: vec![f64::INFINITY; 2],
        row_lower: vec![7., 12., 6.],
        row_upper: vec![f64::INFINITY; 3],
    }
}
