//! The [GLPK](https://www.gnu.org/software/glpk/) engine, loaded at runtime.
//!
//! `libglpk` is looked up among a list of candidate names the first time it is needed, so
//! this crate builds on machines without GLPK and fails with [Error::LibraryLoad] only
//! when a problem is actually created.
use std::ffi::{c_void, CStr, CString, OsStr};
use std::mem::MaybeUninit;
use std::os::raw::{c_char, c_int};
use std::path::Path;
use std::ptr::NonNull;
use std::sync::{Arc, OnceLock};

use libloading::Library;

use crate::solvers::{NativeProblem, PhaseParams};
use crate::{Error, FileFormat, Result};

/// Returned by [NativeProblem::read] and [NativeProblem::write] when the path cannot be passed
/// to C (interior NUL byte or, off unix, non UTF-8).
pub const INVALID_PATH: i32 = -1;

/// Library names tried by [Glpk::load], in order.
pub fn default_candidates() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &["glpk.dll"]
    } else if cfg!(target_os = "macos") {
        &["libglpk.dylib"]
    } else {
        &["libglpk.so", "libglpk.so.40"]
    }
}

/// `glp_prob`, never dereferenced on this side.
#[repr(C)]
pub struct GlpProb {
    _private: [u8; 0],
}

/// `glp_smcp`, the simplex control parameters.
#[repr(C)]
#[allow(dead_code)]
struct Smcp {
    msg_lev: c_int,
    meth: c_int,
    pricing: c_int,
    r_test: c_int,
    tol_bnd: f64,
    tol_dj: f64,
    tol_piv: f64,
    obj_ll: f64,
    obj_ul: f64,
    it_lim: c_int,
    tm_lim: c_int,
    out_frq: c_int,
    out_dly: c_int,
    presolve: c_int,
    excl: c_int,
    shift: c_int,
    aorn: c_int,
    foo_bar: [f64; 33],
}

/// `glp_iocp`, the branch-and-cut control parameters.
#[repr(C)]
#[allow(dead_code)]
struct Iocp {
    msg_lev: c_int,
    br_tech: c_int,
    bt_tech: c_int,
    tol_int: f64,
    tol_obj: f64,
    tm_lim: c_int,
    out_frq: c_int,
    out_dly: c_int,
    cb_func: Option<unsafe extern "C" fn(*mut c_void, *mut c_void)>,
    cb_info: *mut c_void,
    cb_size: c_int,
    pp_tech: c_int,
    mip_gap: f64,
    mir_cuts: c_int,
    gmi_cuts: c_int,
    cov_cuts: c_int,
    clq_cuts: c_int,
    presolve: c_int,
    binarize: c_int,
    fp_heur: c_int,
    ps_heur: c_int,
    ps_tm_lim: c_int,
    sr_heur: c_int,
    use_sol: c_int,
    save_sol: *const c_char,
    alien: c_int,
    flip: c_int,
    foo_bar: [f64; 23],
}

/// Declares the function table and loads every entry as `glp_<name>`.
macro_rules! glpk_api {
    ($( $name:ident : fn($($arg:ty),*) $(-> $ret:ty)?; )+) => {
        struct GlpkApi {
            $( $name: unsafe extern "C" fn($($arg),*) $(-> $ret)?, )+
        }

        impl GlpkApi {
            /// # Safety
            /// `library` must be a GLPK build whose symbols have the declared signatures.
            unsafe fn load(library: &Library) -> std::result::Result<Self, libloading::Error> {
                Ok(GlpkApi {
                    $(
                        $name: *library.get::<unsafe extern "C" fn($($arg),*) $(-> $ret)?>(
                            concat!("glp_", stringify!($name), "\0").as_bytes(),
                        )?,
                    )+
                })
            }
        }
    };
}

glpk_api! {
    version: fn() -> *const c_char;
    create_prob: fn() -> *mut GlpProb;
    delete_prob: fn(*mut GlpProb);
    erase_prob: fn(*mut GlpProb);
    copy_prob: fn(*mut GlpProb, *mut GlpProb, c_int);
    set_obj_dir: fn(*mut GlpProb, c_int);
    add_rows: fn(*mut GlpProb, c_int) -> c_int;
    add_cols: fn(*mut GlpProb, c_int) -> c_int;
    set_obj_coef: fn(*mut GlpProb, c_int, f64);
    load_matrix: fn(*mut GlpProb, c_int, *const c_int, *const c_int, *const f64);
    set_col_kind: fn(*mut GlpProb, c_int, c_int);
    set_col_bnds: fn(*mut GlpProb, c_int, c_int, f64, f64);
    set_row_bnds: fn(*mut GlpProb, c_int, c_int, f64, f64);
    get_num_rows: fn(*mut GlpProb) -> c_int;
    get_num_cols: fn(*mut GlpProb) -> c_int;
    get_num_int: fn(*mut GlpProb) -> c_int;
    read_lp: fn(*mut GlpProb, *const c_void, *const c_char) -> c_int;
    write_lp: fn(*mut GlpProb, *const c_void, *const c_char) -> c_int;
    read_mps: fn(*mut GlpProb, c_int, *const c_void, *const c_char) -> c_int;
    write_mps: fn(*mut GlpProb, c_int, *const c_void, *const c_char) -> c_int;
    init_smcp: fn(*mut Smcp);
    simplex: fn(*mut GlpProb, *const Smcp) -> c_int;
    init_iocp: fn(*mut Iocp);
    intopt: fn(*mut GlpProb, *const Iocp) -> c_int;
    get_status: fn(*mut GlpProb) -> c_int;
    get_obj_val: fn(*mut GlpProb) -> f64;
    get_row_prim: fn(*mut GlpProb, c_int) -> f64;
    get_row_dual: fn(*mut GlpProb, c_int) -> f64;
    get_col_prim: fn(*mut GlpProb, c_int) -> f64;
    get_col_dual: fn(*mut GlpProb, c_int) -> f64;
    mip_status: fn(*mut GlpProb) -> c_int;
    mip_obj_val: fn(*mut GlpProb) -> f64;
    mip_row_val: fn(*mut GlpProb, c_int) -> f64;
    mip_col_val: fn(*mut GlpProb, c_int) -> f64;
}

struct GlpkLibrary {
    api: GlpkApi,
    // Must outlive every function pointer in `api`
    _library: Library,
}

/// A loaded GLPK library. Cheap to clone; problems keep it alive.
#[derive(Clone)]
pub struct Glpk {
    library: Arc<GlpkLibrary>,
}

impl std::fmt::Debug for Glpk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Glpk")
            .field("version", &self.version())
            .finish()
    }
}

static SHARED: OnceLock<Result<Glpk>> = OnceLock::new();

impl Glpk {
    /// The process-wide library, loaded from [default_candidates] on first use.
    /// A failure is remembered and returned again on later calls.
    pub fn load() -> Result<Glpk> {
        SHARED
            .get_or_init(|| Glpk::load_from(default_candidates()))
            .clone()
    }

    /// Loads GLPK from the first candidate name or path that opens.
    /// Only the last candidate's failure is reported.
    pub fn load_from<I, S>(candidates: I) -> Result<Glpk>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut last_error = Error::LibraryLoad {
            candidate: String::new(),
            reason: "no candidate library given".to_string(),
        };
        for candidate in candidates {
            let candidate = candidate.as_ref();
            match Self::open(candidate) {
                Ok(glpk) => {
                    log::debug!(
                        "Loaded GLPK {} from {}",
                        glpk.version(),
                        candidate.to_string_lossy()
                    );
                    return Ok(glpk);
                }
                Err(e) => {
                    log::warn!("{}", e);
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    fn open(candidate: &OsStr) -> Result<Glpk> {
        let load_error = |e: libloading::Error| Error::LibraryLoad {
            candidate: candidate.to_string_lossy().into_owned(),
            reason: e.to_string(),
        };
        // SAFETY: loading GLPK runs no initialisation code with preconditions,
        // and the symbols are declared with the signatures of glpk.h
        let library = unsafe { Library::new(candidate) }.map_err(load_error)?;
        let api = unsafe { GlpkApi::load(&library) }.map_err(load_error)?;
        Ok(Glpk {
            library: Arc::new(GlpkLibrary {
                api,
                _library: library,
            }),
        })
    }

    fn api(&self) -> &GlpkApi {
        &self.library.api
    }

    /// The library version, e.g. `"5.0"`
    pub fn version(&self) -> String {
        // SAFETY: glp_version returns a pointer to a static NUL-terminated string
        unsafe {
            let version = (self.api().version)();
            if version.is_null() {
                return String::new();
            }
            CStr::from_ptr(version).to_string_lossy().into_owned()
        }
    }

    /// Allocates a new, empty problem object.
    pub fn create_problem(&self) -> GlpkProblem {
        // SAFETY: glp_create_prob has no preconditions; it aborts instead of returning NULL
        let raw = unsafe { (self.api().create_prob)() };
        GlpkProblem {
            glpk: self.clone(),
            raw: NonNull::new(raw).expect("glp_create_prob returned NULL"),
        }
    }
}

/// A `glp_prob` owned by Rust.
///
/// GLPK tracks allocations in a thread-local environment, so a problem must be created,
/// used and deleted on the same thread. That is why this type is neither `Send` nor `Sync`.
pub struct GlpkProblem {
    glpk: Glpk,
    raw: NonNull<GlpProb>,
}

impl std::fmt::Debug for GlpkProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlpkProblem")
            .field("rows", &self.num_rows())
            .field("cols", &self.num_cols())
            .finish()
    }
}

/// GLPK rows and columns are numbered from 1
fn native_index(index: usize) -> c_int {
    c(index + 1)
}

fn c(n: usize) -> c_int {
    c_int::try_from(n).expect("size too large for GLPK")
}

fn c_path(path: &Path) -> Option<CString> {
    #[cfg(unix)]
    let bytes = {
        use std::os::unix::ffi::OsStrExt;
        path.as_os_str().as_bytes().to_vec()
    };
    #[cfg(not(unix))]
    let bytes = path.to_str()?.as_bytes().to_vec();
    CString::new(bytes).ok()
}

/// Fills a control parameter struct with its GLPK defaults.
///
/// The `glp_init_*` routines leave the reserved tail of the struct untouched, so the memory
/// starts zeroed.
///
/// # Safety
/// All-zero bytes must be a valid `T` (true for [Smcp] and [Iocp]) and `init` must only
/// write within a `T`.
unsafe fn init_parm<T>(init: unsafe extern "C" fn(*mut T)) -> T {
    let mut parm = MaybeUninit::<T>::zeroed();
    init(parm.as_mut_ptr());
    parm.assume_init()
}

impl GlpkProblem {
    fn api(&self) -> &GlpkApi {
        self.glpk.api()
    }

    fn ptr(&self) -> *mut GlpProb {
        self.raw.as_ptr()
    }

    /// The library this problem was created with
    pub fn glpk(&self) -> &Glpk {
        &self.glpk
    }
}

impl Drop for GlpkProblem {
    fn drop(&mut self) {
        // SAFETY: `raw` came from glp_create_prob and is deleted only here
        unsafe { (self.api().delete_prob)(self.ptr()) }
    }
}

impl Clone for GlpkProblem {
    /// Deep copy, including row and column names.
    fn clone(&self) -> Self {
        let copy = self.glpk.create_problem();
        // SAFETY: both pointers are live and distinct
        unsafe { (self.api().copy_prob)(copy.ptr(), self.ptr(), 1) };
        copy
    }
}

// All calls below pass a live pointer owned by `self`. Index arguments are checked by the
// caller against the counts GLPK reports, as required by the NativeProblem contract.
impl NativeProblem for GlpkProblem {
    fn erase(&mut self) {
        unsafe { (self.api().erase_prob)(self.ptr()) }
    }

    fn add_rows(&mut self, count: usize) {
        // GLPK rejects a count of zero
        if count > 0 {
            unsafe { (self.api().add_rows)(self.ptr(), c(count)) };
        }
    }

    fn add_cols(&mut self, count: usize) {
        if count > 0 {
            unsafe { (self.api().add_cols)(self.ptr(), c(count)) };
        }
    }

    fn set_obj_dir(&mut self, direction: i32) {
        unsafe { (self.api().set_obj_dir)(self.ptr(), direction) }
    }

    fn set_obj_coef(&mut self, col: usize, coef: f64) {
        unsafe { (self.api().set_obj_coef)(self.ptr(), native_index(col), coef) }
    }

    fn load_matrix(&mut self, rows: &[usize], cols: &[usize], values: &[f64]) {
        // Element 0 of each array is ignored by GLPK
        let ia: Vec<c_int> = std::iter::once(0)
            .chain(rows.iter().map(|&r| native_index(r)))
            .collect();
        let ja: Vec<c_int> = std::iter::once(0)
            .chain(cols.iter().map(|&j| native_index(j)))
            .collect();
        let ar: Vec<f64> = std::iter::once(0.).chain(values.iter().copied()).collect();
        unsafe {
            (self.api().load_matrix)(
                self.ptr(),
                c(values.len()),
                ia.as_ptr(),
                ja.as_ptr(),
                ar.as_ptr(),
            )
        }
    }

    fn set_col_kind(&mut self, col: usize, kind: i32) {
        unsafe { (self.api().set_col_kind)(self.ptr(), native_index(col), kind) }
    }

    fn set_col_bounds(&mut self, col: usize, kind: i32, lower: f64, upper: f64) {
        unsafe { (self.api().set_col_bnds)(self.ptr(), native_index(col), kind, lower, upper) }
    }

    fn set_row_bounds(&mut self, row: usize, kind: i32, lower: f64, upper: f64) {
        unsafe { (self.api().set_row_bnds)(self.ptr(), native_index(row), kind, lower, upper) }
    }

    fn num_rows(&self) -> usize {
        unsafe { (self.api().get_num_rows)(self.ptr()) as usize }
    }

    fn num_cols(&self) -> usize {
        unsafe { (self.api().get_num_cols)(self.ptr()) as usize }
    }

    fn num_int(&self) -> usize {
        unsafe { (self.api().get_num_int)(self.ptr()) as usize }
    }

    fn read(&mut self, path: &Path, format: FileFormat) -> i32 {
        let Some(fname) = c_path(path) else {
            return INVALID_PATH;
        };
        let parm = std::ptr::null();
        unsafe {
            match format {
                FileFormat::Lp => (self.api().read_lp)(self.ptr(), parm, fname.as_ptr()),
                FileFormat::Mps(fmt) => {
                    (self.api().read_mps)(self.ptr(), fmt.code(), parm, fname.as_ptr())
                }
            }
        }
    }

    fn write(&self, path: &Path, format: FileFormat) -> i32 {
        let Some(fname) = c_path(path) else {
            return INVALID_PATH;
        };
        let parm = std::ptr::null();
        unsafe {
            match format {
                FileFormat::Lp => (self.api().write_lp)(self.ptr(), parm, fname.as_ptr()),
                FileFormat::Mps(fmt) => {
                    (self.api().write_mps)(self.ptr(), fmt.code(), parm, fname.as_ptr())
                }
            }
        }
    }

    fn simplex(&mut self, params: &PhaseParams) -> i32 {
        unsafe {
            let mut parm = init_parm(self.api().init_smcp);
            parm.msg_lev = params.message_level;
            if let Some(tm_lim) = params.time_limit_ms {
                parm.tm_lim = tm_lim;
            }
            (self.api().simplex)(self.ptr(), &parm)
        }
    }

    fn intopt(&mut self, params: &PhaseParams) -> i32 {
        unsafe {
            let mut parm = init_parm(self.api().init_iocp);
            parm.msg_lev = params.message_level;
            if let Some(tm_lim) = params.time_limit_ms {
                parm.tm_lim = tm_lim;
            }
            (self.api().intopt)(self.ptr(), &parm)
        }
    }

    fn lp_status(&self) -> i32 {
        unsafe { (self.api().get_status)(self.ptr()) }
    }

    fn lp_obj_val(&self) -> f64 {
        unsafe { (self.api().get_obj_val)(self.ptr()) }
    }

    fn row_prim(&self, row: usize) -> f64 {
        unsafe { (self.api().get_row_prim)(self.ptr(), native_index(row)) }
    }

    fn row_dual(&self, row: usize) -> f64 {
        unsafe { (self.api().get_row_dual)(self.ptr(), native_index(row)) }
    }

    fn col_prim(&self, col: usize) -> f64 {
        unsafe { (self.api().get_col_prim)(self.ptr(), native_index(col)) }
    }

    fn col_dual(&self, col: usize) -> f64 {
        unsafe { (self.api().get_col_dual)(self.ptr(), native_index(col)) }
    }

    fn mip_status(&self) -> i32 {
        unsafe { (self.api().mip_status)(self.ptr()) }
    }

    fn mip_obj_val(&self) -> f64 {
        unsafe { (self.api().mip_obj_val)(self.ptr()) }
    }

    fn mip_row_val(&self, row: usize) -> f64 {
        unsafe { (self.api().mip_row_val)(self.ptr(), native_index(row)) }
    }

    fn mip_col_val(&self, col: usize) -> f64 {
        unsafe { (self.api().mip_col_val)(self.ptr(), native_index(col)) }
    }
}
