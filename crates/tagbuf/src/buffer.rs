// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Buffer - manually managed byte block behind a validity tag.

use std::fmt;
use std::mem;
use std::ptr::{self, NonNull};

use tagbuf_rand::{ProcessSignatures, SignatureSource};

use crate::error::BufferError;
use crate::guard::ScopedBuffer;
use crate::raw;
use crate::tag::ValidityTag;

/// Fields of an initialized handle.
struct Block {
    memory: Option<NonNull<u8>>,
    size: usize,
    alloc_size: usize,
    user_data: usize,
    tag: ValidityTag,
}

impl Block {
    fn empty(signature: u64) -> Self {
        Self::with_memory(signature, None, 0, 0)
    }

    fn with_memory(
        signature: u64,
        memory: Option<NonNull<u8>>,
        size: usize,
        user_data: usize,
    ) -> Self {
        Self {
            memory,
            size,
            alloc_size: size,
            user_data,
            tag: ValidityTag::seal(signature, memory, size, size),
        }
    }

    #[inline(always)]
    fn is_sealed(&self) -> bool {
        self.tag.verify(self.memory, self.size, self.alloc_size)
    }

    #[inline(always)]
    fn reseal(&mut self) {
        self.tag.reseal(self.memory, self.size, self.alloc_size);
        self.debug_assert_invariant();
    }

    #[inline(always)]
    fn debug_assert_invariant(&self) {
        debug_assert!(
            self.size <= self.alloc_size,
            "Invariant violated: size ({}) <= alloc_size ({})",
            self.size,
            self.alloc_size
        );
        debug_assert_eq!(
            self.memory.is_some(),
            self.alloc_size > 0,
            "Invariant violated: memory present iff alloc_size > 0"
        );
    }

    fn attach(&mut self, memory: NonNull<u8>, size: usize) {
        self.memory = Some(memory);
        self.size = size;
        self.alloc_size = size;
        self.reseal();
    }

    fn release(&mut self) {
        if let Some(ptr) = self.memory.take() {
            // SAFETY: the block owns `alloc_size` bytes at `ptr`.
            unsafe { raw::deallocate(ptr, self.alloc_size) };
            log::trace!("freed {} bytes", self.alloc_size);
        }

        self.size = 0;
        self.alloc_size = 0;
        self.reseal();
    }

    /// Physically resizes to exactly `new_size` bytes. Bytes past the old
    /// `alloc_size` are zeroed.
    fn resize_exact(&mut self, new_size: usize) {
        debug_assert!(new_size > 0);
        let old_alloc_size = self.alloc_size;

        let ptr = match self.memory {
            Some(ptr) => {
                // SAFETY: the block owns `old_alloc_size` bytes at `ptr`.
                let ptr = unsafe { raw::reallocate(ptr, old_alloc_size, new_size) };

                if new_size > old_alloc_size {
                    // SAFETY: [old_alloc_size, new_size) lies inside the new block.
                    unsafe {
                        ptr.as_ptr()
                            .add(old_alloc_size)
                            .write_bytes(0, new_size - old_alloc_size)
                    };
                }

                ptr
            }
            None => raw::allocate_zeroed(new_size),
        };

        log::trace!("reallocated {old_alloc_size} -> {new_size} bytes");
        self.attach(ptr, new_size);
    }

    fn as_slice(&self) -> &[u8] {
        match self.memory {
            // SAFETY: the block owns `alloc_size >= size` bytes at `ptr`.
            Some(ptr) => unsafe { std::slice::from_raw_parts(ptr.as_ptr(), self.size) },
            None => &[],
        }
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        match self.memory {
            // SAFETY: the block owns `alloc_size >= size` bytes at `ptr`, and
            // `&mut self` is the only way to reach them.
            Some(ptr) => unsafe { std::slice::from_raw_parts_mut(ptr.as_ptr(), self.size) },
            None => &mut [],
        }
    }
}

enum State {
    Uninit,
    Valid(Block),
}

/// A manually managed byte buffer.
///
/// Pairs an owned raw byte block with its logical size (`size`), its physical
/// size (`alloc_size`), an opaque `user_data` word and a validity tag.
///
/// # Validity
///
/// A handle is valid only if it went through [`Buffer::init`] (directly or
/// through an operation that calls it) and its tag still matches its fields.
/// [`Buffer::default`] and [`Buffer::finalize`] produce invalid handles.
/// Invalid handles are never dereferenced: accessors return neutral values,
/// creating operations re-initialize them, consuming operations fail with
/// [`BufferError::InvalidBuffer`].
///
/// # Ownership
///
/// `Buffer` is neither `Clone` nor `Copy`, and it does **not** free on drop.
/// Every allocation must be released with [`Buffer::free`] or
/// [`Buffer::finalize`]; dropping a buffer that still holds memory leaks it.
/// Use [`ScopedBuffer`] to finalize on scope exit. `Buffer` is neither `Send`
/// nor `Sync`.
///
/// # Initialized bytes
///
/// [`Buffer::get`] is the only operation that hands out uninitialized bytes,
/// which is why it is `unsafe`. Everything else keeps `[0, alloc_size)`
/// initialized: [`Buffer::alloc`] zero-fills, and [`Buffer::realloc`] zero-fills
/// whatever a physical resize adds past the previous `alloc_size`.
pub struct Buffer {
    state: State,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::uninit()
    }
}

impl Buffer {
    /// Creates an uninitialized handle. [`Buffer::is_valid`] returns `false`.
    pub const fn uninit() -> Self {
        Self {
            state: State::Uninit,
        }
    }

    /// Creates a valid, empty handle.
    pub fn new() -> Self {
        let mut buffer = Self::uninit();
        buffer.init();
        buffer
    }

    /// Initializes the handle with a signature from [`ProcessSignatures`].
    ///
    /// Resets memory, sizes and user data. Previous state is overwritten
    /// without being freed: re-initializing a handle that still owns memory
    /// leaks that memory.
    pub fn init(&mut self) {
        self.init_with(&mut ProcessSignatures);
    }

    /// Initializes the handle with a signature from an explicit source.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tagbuf::{Buffer, SignatureSequence};
    /// use tagbuf_rand::SystemEntropySource;
    ///
    /// let mut signatures = SignatureSequence::new(SystemEntropySource {});
    /// let mut buffer = Buffer::uninit();
    /// buffer.init_with(&mut signatures);
    /// assert!(buffer.is_valid());
    /// ```
    pub fn init_with<S: SignatureSource + ?Sized>(&mut self, signatures: &mut S) {
        self.state = State::Valid(Block::empty(signatures.next_signature()));
    }

    /// Wraps an externally allocated block into a new valid handle.
    ///
    /// `size` becomes both the logical and the allocated size. A null `ptr` or
    /// a zero `size` yields a valid, empty handle (and `ptr` is ignored).
    ///
    /// # Safety
    ///
    /// If `size > 0` and `ptr` is non-null, `ptr` must have been allocated by
    /// the global allocator with the layout of `[u8; size]` (for example the
    /// pointer of a `Box<[u8]>` of length `size`), all `size` bytes must be
    /// initialized, and ownership moves to the handle: the caller must not
    /// free or use it independently afterwards.
    pub unsafe fn build(ptr: *mut u8, size: usize, user_data: usize) -> Self {
        let memory = if size == 0 { None } else { NonNull::new(ptr) };
        let size = if memory.is_some() { size } else { 0 };

        Self {
            state: State::Valid(Block::with_memory(
                ProcessSignatures.next_signature(),
                memory,
                size,
                user_data,
            )),
        }
    }

    /// Takes ownership of a boxed byte slice.
    ///
    /// The safe form of [`Buffer::build`].
    pub fn from_boxed_slice(bytes: Box<[u8]>, user_data: usize) -> Self {
        let size = bytes.len();
        let ptr = Box::into_raw(bytes).cast::<u8>();

        // SAFETY: a `Box<[u8]>` of length `size` is allocated by the global
        // allocator with the layout of `[u8; size]`, and its bytes are initialized.
        unsafe { Self::build(ptr, size, user_data) }
    }

    /// Wraps the handle in a [`ScopedBuffer`] that finalizes it on drop.
    pub fn scoped(self) -> ScopedBuffer {
        ScopedBuffer::from_buffer(self)
    }

    /// Frees any held memory and makes the handle permanently invalid.
    ///
    /// [`Buffer::init`] must be called again before reuse (creating operations
    /// do so on their own).
    pub fn finalize(&mut self) {
        if let State::Valid(block) = &mut self.state {
            // A block whose tag does not match cannot be trusted with a free.
            if block.is_sealed() {
                block.release();
            }
            block.tag.revoke();
        }

        self.state = State::Uninit;
        log::trace!("finalized buffer");
    }

    /// Returns `true` if the handle is initialized and its tag matches.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.block().is_some()
    }

    #[inline(always)]
    fn block(&self) -> Option<&Block> {
        match &self.state {
            State::Valid(block) if block.is_sealed() => Some(block),
            _ => None,
        }
    }

    #[inline(always)]
    fn block_mut(&mut self) -> Option<&mut Block> {
        match &mut self.state {
            State::Valid(block) if block.is_sealed() => Some(block),
            _ => None,
        }
    }

    fn ensure_valid(&mut self) -> &mut Block {
        if !self.is_valid() {
            log::debug!("initializing invalid buffer on write");
            self.init();
        }

        match &mut self.state {
            State::Valid(block) => block,
            State::Uninit => unreachable!("buffer initialized above"),
        }
    }

    fn obtain(&mut self, size: usize, allocate: fn(usize) -> NonNull<u8>) {
        self.free();
        let block = self.ensure_valid();

        if size == 0 {
            return;
        }

        block.attach(allocate(size), size);
        log::trace!("allocated {size} bytes");
    }

    /// Allocates exactly `size` uncleared bytes.
    ///
    /// Initializes an invalid handle first, or frees the memory a valid one
    /// holds. Sets `size == alloc_size == size`. `size == 0` leaves a valid
    /// handle without memory.
    ///
    /// # Safety
    ///
    /// The bytes in `[0, size)` are uninitialized. The caller must write all of
    /// them (through [`Buffer::as_mut_ptr`]) before reading them through
    /// [`Buffer::as_slice`], [`Buffer::as_mut_slice`] or any stream operation.
    ///
    /// # Panics
    ///
    /// Panics if `size` exceeds `isize::MAX`. Aborts through
    /// [`handle_alloc_error`](std::alloc::handle_alloc_error) if the
    /// allocation fails.
    pub unsafe fn get(&mut self, size: usize) {
        self.obtain(size, raw::allocate);
    }

    /// Same as [`Buffer::get`], but zero-fills the block.
    ///
    /// # Panics
    ///
    /// Panics if `size` exceeds `isize::MAX`.
    pub fn alloc(&mut self, size: usize) {
        self.obtain(size, raw::allocate_zeroed);
    }

    /// Releases held memory and resets both sizes to `0`.
    ///
    /// The handle stays valid. On an invalid handle this is [`Buffer::init`].
    pub fn free(&mut self) {
        if !self.is_valid() {
            self.init();
            return;
        }

        if let Some(block) = self.block_mut() {
            block.release();
        }
    }

    /// Resizes the buffer to `new_size`.
    ///
    /// - Invalid handle: behaves as [`Buffer::alloc`].
    /// - `new_size == 0`: behaves as [`Buffer::free`].
    /// - `new_size > alloc_size` or `allow_shrink`: the block is physically
    ///   resized to exactly `new_size` (unless `new_size == size` already),
    ///   keeping the leading bytes. Bytes past the old `alloc_size` are zeroed.
    /// - Otherwise only `size` moves; `alloc_size` and every byte inside it are
    ///   kept, so growing back within the envelope costs nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tagbuf::Buffer;
    ///
    /// let mut buffer = Buffer::new();
    /// buffer.store(&[1, 2, 3, 4]);
    ///
    /// buffer.realloc(2, false);
    /// assert_eq!((buffer.size(), buffer.alloc_size()), (2, 4));
    ///
    /// buffer.realloc(4, false);
    /// assert_eq!(buffer.as_slice(), &[1, 2, 3, 4]);
    /// # buffer.free();
    /// ```
    pub fn realloc(&mut self, new_size: usize, allow_shrink: bool) {
        if !self.is_valid() {
            self.alloc(new_size);
            return;
        }

        if new_size == 0 {
            self.free();
            return;
        }

        let block = self.ensure_valid();

        if new_size > block.alloc_size || allow_shrink {
            if new_size != block.size {
                block.resize_exact(new_size);
            }
        } else {
            block.size = new_size;
            block.reseal();
        }
    }

    /// Returns an independent copy of the buffer: same bytes, same user data,
    /// its own block.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidBuffer`] if `self` is invalid.
    pub fn copy(&self) -> Result<Buffer, BufferError> {
        let source = self.block().ok_or(BufferError::InvalidBuffer)?;

        let mut copy = Buffer::new();
        let block = copy.ensure_valid();

        if let Some(src) = source.memory {
            if source.size > 0 {
                let dst = raw::allocate(source.size);
                // SAFETY (PRECONDITIONS ARE MET): `src` holds at least `size`
                // bytes, `dst` exactly `size`, and they are distinct blocks.
                unsafe { ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), source.size) };
                block.attach(dst, source.size);
            }
        }

        block.user_data = source.user_data;

        Ok(copy)
    }

    /// Copies bytes and user data into `dest`, resizing it to `self.size()`.
    ///
    /// An invalid `dest` is initialized on the way.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidBuffer`] if `self` is invalid; `dest` is
    /// left untouched.
    pub fn copy_into(&self, dest: &mut Buffer) -> Result<(), BufferError> {
        let source = self.block().ok_or(BufferError::InvalidBuffer)?;

        dest.realloc(source.size, true);

        let block = dest.ensure_valid();
        block.as_mut_slice().copy_from_slice(source.as_slice());
        block.user_data = source.user_data;

        Ok(())
    }

    /// Replaces the whole content with `src`, resizing to exactly `src.len()`.
    ///
    /// An invalid handle is initialized on the way.
    pub fn store(&mut self, src: &[u8]) {
        self.realloc(src.len(), true);

        let block = self.ensure_valid();
        block.as_mut_slice().copy_from_slice(src);
    }

    /// Returns the block pointer, or `None` when invalid or empty.
    #[inline]
    pub fn memory(&self) -> Option<NonNull<u8>> {
        self.block().and_then(|block| block.memory)
    }

    /// Returns the block pointer, or null when invalid or empty.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.memory()
            .map_or(ptr::null(), |memory| memory.as_ptr() as *const u8)
    }

    /// Returns the mutable block pointer, or null when invalid or empty.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.memory().map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    /// Returns the logical size, `0` when invalid.
    #[inline]
    pub fn size(&self) -> usize {
        self.block().map_or(0, |block| block.size)
    }

    /// Returns the allocated size, `0` when invalid.
    #[inline]
    pub fn alloc_size(&self) -> usize {
        self.block().map_or(0, |block| block.alloc_size)
    }

    /// Returns `true` if the logical size is `0` (or the handle is invalid).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns the user data word, `0` when invalid.
    #[inline]
    pub fn user_data(&self) -> usize {
        self.block().map_or(0, |block| block.user_data)
    }

    /// Sets the user data word and returns the previous one.
    ///
    /// On an invalid handle nothing is written and `0` is returned.
    #[inline]
    pub fn set_user_data(&mut self, user_data: usize) -> usize {
        match self.block_mut() {
            Some(block) => mem::replace(&mut block.user_data, user_data),
            None => 0,
        }
    }

    /// Returns the bytes in `[0, size)`; empty when invalid.
    pub fn as_slice(&self) -> &[u8] {
        match self.block() {
            Some(block) => block.as_slice(),
            None => &[],
        }
    }

    /// Returns the bytes in `[0, size)` mutably; empty when invalid.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self.block_mut() {
            Some(block) => block.as_mut_slice(),
            None => &mut [],
        }
    }

    #[cfg(test)]
    pub(crate) fn signature_for_test(&self) -> Option<u64> {
        self.block().map(|block| block.tag.signature())
    }

    /// Changes `size` without resealing, as stray writes into the handle would.
    #[cfg(test)]
    pub(crate) fn corrupt_size_for_test(&mut self, size: usize) {
        if let State::Valid(block) = &mut self.state {
            block.size = size;
        }
    }

    /// Builds a `Valid` state whose fields are all zero, as if read from
    /// zeroed memory.
    #[cfg(test)]
    pub(crate) fn zeroed_for_test() -> Self {
        Self {
            state: State::Valid(Block {
                memory: None,
                size: 0,
                alloc_size: 0,
                user_data: 0,
                tag: ValidityTag::zeroed_for_test(),
            }),
        }
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.block() {
            Some(block) => f
                .debug_struct("Buffer")
                .field("data", &"REDACTED")
                .field("size", &block.size)
                .field("alloc_size", &block.alloc_size)
                .field("user_data", &block.user_data)
                .finish(),
            None => f.write_str("Buffer(uninit)"),
        }
    }
}
