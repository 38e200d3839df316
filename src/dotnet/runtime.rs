use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use netcorehost::{hostfxr::AssemblyDelegateLoader, nethost, pdcstr, pdcstring::PdCString};

use super::buffer::{allocate_buffer, RawVec};
use crate::error::{Error, Result};

/// The deployment-configuration variable naming the directory that holds the
/// managed bridge assembly and its runtime config.
pub const RUNTIME_DIR_VAR: &str = "UV2CSV_DOTNET_DIR";

const ASSEMBLY_NAME: &str = "libuvreader";

static RUNTIME_DIR: OnceLock<PathBuf> = OnceLock::new();
static RUNTIME: OnceLock<Arc<AssemblyDelegateLoader>> = OnceLock::new();

/// Configure where the managed bridge assembly lives before the runtime is
/// first created. Returns `false` if a directory was already set.
///
/// When never called, the `UV2CSV_DOTNET_DIR` environment variable is
/// consulted instead.
pub fn set_runtime_dir<P: Into<PathBuf>>(dir: P) -> bool {
    RUNTIME_DIR.set(dir.into()).is_ok()
}

fn locate_runtime_dir() -> Result<PathBuf> {
    if let Some(dir) = RUNTIME_DIR.get() {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(RUNTIME_DIR_VAR) {
        return Ok(PathBuf::from(dir));
    }
    Err(Error::VendorLibraryUnavailable(format!(
        "no bridge assembly directory configured, call `set_runtime_dir` or set {RUNTIME_DIR_VAR}"
    )))
}

fn encode_path(path: &Path) -> Result<PdCString> {
    path.to_string_lossy().parse().map_err(|e| {
        Error::VendorLibraryUnavailable(format!("could not encode {}: {e:?}", path.display()))
    })
}

/// Start the `dotnet` runtime hosting the bridge assembly, or hand back the
/// already-running one. Idempotent, safe to call any number of times.
pub fn initialize() -> Result<Arc<AssemblyDelegateLoader>> {
    if let Some(loader) = RUNTIME.get() {
        return Ok(loader.clone());
    }
    let dir = locate_runtime_dir()?;
    let loader = create_runtime(&dir)?;
    Ok(RUNTIME.get_or_init(|| loader).clone())
}

fn create_runtime(dir: &Path) -> Result<Arc<AssemblyDelegateLoader>> {
    let runtime_config = dir.join(format!("{ASSEMBLY_NAME}.runtimeconfig.json"));
    let assembly = dir.join(format!("{ASSEMBLY_NAME}.dll"));
    if !runtime_config.is_file() || !assembly.is_file() {
        return Err(Error::VendorLibraryUnavailable(format!(
            "{} does not contain the {ASSEMBLY_NAME} bridge assembly",
            dir.display()
        )));
    }

    let hostfxr = nethost::load_hostfxr()
        .map_err(|e| Error::VendorLibraryUnavailable(format!("loading hostfxr: {e:?}")))?;

    let context = hostfxr
        .initialize_for_runtime_config(encode_path(&runtime_config)?)
        .map_err(|e| {
            Error::VendorLibraryUnavailable(format!("initializing the dotnet runtime: {e:?}"))
        })?;

    let loader = Arc::new(
        context
            .get_delegate_loader_for_assembly(encode_path(&assembly)?)
            .map_err(|e| {
                Error::VendorLibraryUnavailable(format!("loading the bridge assembly: {e:?}"))
            })?,
    );

    configure_allocator(&loader)?;
    Ok(loader)
}

/// Hand the bridge the allocation callback it uses to fill buffers that
/// Rust's allocator owns.
fn configure_allocator(loader: &AssemblyDelegateLoader) -> Result<()> {
    let set_allocator = loader
        .get_function_with_unmanaged_callers_only::<fn(extern "system" fn(usize, *mut RawVec<u8>))>(
            pdcstr!("libuvreader.Exports, libuvreader"),
            pdcstr!("SetRustAllocateMemory"),
        )
        .map_err(|e| {
            Error::VendorLibraryUnavailable(format!("binding SetRustAllocateMemory: {e:?}"))
        })?;
    set_allocator(allocate_buffer);
    Ok(())
}
