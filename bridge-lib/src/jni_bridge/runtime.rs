//! `ManagedRuntime` over a `JavaVM`

use crate::descriptor::{
    DescriptorRegistry, DescriptorResolver, ManagedClass, ManagedMethod, ReturnKind,
};
use crate::engine::DataBuffer;
use crate::error::{BridgeError, Result};
use crate::guard::ExceptionSink;
use crate::handle::Handle;
use crate::runtime::{Arg, ManagedRuntime, ManagedValue};
use jni::objects::{GlobalRef, JClass, JMethodID, JObject, JString, JValue};
use jni::signature::{Primitive, ReturnType};
use jni::sys::jvalue;
use jni::{JNIEnv, JavaVM};
use log::{error, warn};

/// Local references one call may create: a string per argument, a buffer and
/// its wrapper, and the returned object.
const LOCAL_FRAME_CAPACITY: i32 = 16;

impl From<jni::errors::Error> for BridgeError {
    fn from(err: jni::errors::Error) -> Self {
        BridgeError::managed(err)
    }
}

impl ExceptionSink for JNIEnv<'_> {
    fn raise(&mut self, error: &BridgeError) {
        // a managed exception already pending wins
        if self.exception_check().unwrap_or(false) {
            return;
        }
        if let Err(e) = self.throw_new(error.managed_class(), error.to_string()) {
            error!("Failed to raise {}: {}", error.managed_class(), e);
        }
    }
}

/// Describes and clears a pending managed exception.
fn take_exception(env: &mut JNIEnv, what: &str) -> Result<()> {
    if !env.exception_check()? {
        return Ok(());
    }
    let _ = env.exception_describe();
    env.exception_clear()?;
    warn!("{} threw", what);
    Err(BridgeError::managed(format!("{} threw", what)))
}

/// Resolves descriptors with `FindClass`/`GetMethodID` on a live env.
pub struct JniResolver<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
}

impl<'a, 'local> JniResolver<'a, 'local> {
    pub fn new(env: &'a mut JNIEnv<'local>) -> Self {
        Self { env }
    }

    fn failed(&mut self, err: jni::errors::Error) -> BridgeError {
        if self.env.exception_check().unwrap_or(false) {
            let _ = self.env.exception_clear();
        }
        BridgeError::from(err)
    }
}

impl DescriptorResolver for JniResolver<'_, '_> {
    type Class = GlobalRef;
    type Method = JMethodID;

    fn find_class(&mut self, binary_name: &str) -> Result<GlobalRef> {
        let class = match self.env.find_class(binary_name) {
            Ok(class) => class,
            Err(e) => return Err(self.failed(e)),
        };
        Ok(self.env.new_global_ref(class)?)
    }

    fn find_method(&mut self, class: &GlobalRef, name: &str, signature: &str) -> Result<JMethodID> {
        match self
            .env
            .get_method_id(<&JClass>::from(class.as_obj()), name, signature)
        {
            Ok(method) => Ok(method),
            Err(e) => Err(self.failed(e)),
        }
    }
}

pub struct JniRuntime {
    vm: JavaVM,
    registry: DescriptorRegistry<GlobalRef, JMethodID>,
}

impl JniRuntime {
    pub fn new(vm: JavaVM, registry: DescriptorRegistry<GlobalRef, JMethodID>) -> Self {
        Self { vm, registry }
    }

    /// Attaches the calling thread for the rest of its life. A no-op on
    /// threads that are already attached.
    fn env(&self) -> Result<JNIEnv<'_>> {
        Ok(self.vm.attach_current_thread_permanently()?)
    }

    fn class(&self, class: ManagedClass) -> &JClass<'static> {
        <&JClass>::from(self.registry.class(class).as_obj())
    }

    /// Wraps native memory in a `DataChannel.Buffer` without copying.
    fn wrap_buffer<'local>(
        &self,
        env: &mut JNIEnv<'local>,
        buffer: DataBuffer<'_>,
    ) -> Result<JObject<'local>> {
        // the managed side only reads the buffer during the call
        let data = unsafe {
            env.new_direct_byte_buffer(buffer.data.as_ptr() as *mut u8, buffer.data.len())?
        };
        let object = unsafe {
            env.new_object_unchecked(
                self.class(ManagedClass::Buffer),
                self.registry.method(ManagedMethod::BufferInit),
                &[
                    JValue::Object(&data).as_jni(),
                    JValue::Bool(buffer.binary.into()).as_jni(),
                ],
            )
        };
        take_exception(env, "DataChannel.Buffer.<init>")?;
        Ok(object?)
    }

    fn to_jvalue<'local>(
        &self,
        env: &mut JNIEnv<'local>,
        arg: &Arg<'_, GlobalRef>,
    ) -> Result<jvalue> {
        Ok(match arg {
            Arg::Object(object) => JValue::Object(object.as_obj()).as_jni(),
            Arg::Str(value) => {
                let value = env.new_string(value)?;
                JValue::Object(&value).as_jni()
            }
            Arg::Int(value) => JValue::Int(*value).as_jni(),
            Arg::Long(value) => JValue::Long(*value).as_jni(),
            Arg::Buffer(buffer) => {
                let buffer = self.wrap_buffer(env, *buffer)?;
                JValue::Object(&buffer).as_jni()
            }
        })
    }
}

impl ManagedRuntime for JniRuntime {
    type Object = GlobalRef;

    fn construct(&self, constructor: ManagedMethod, handle: Handle) -> Result<GlobalRef> {
        let descriptor = constructor.descriptor();
        if descriptor.returns != ReturnKind::Constructor {
            return Err(BridgeError::managed(format!(
                "{} is not a constructor",
                descriptor.name
            )));
        }
        let mut env = self.env()?;
        env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| -> Result<GlobalRef> {
            let object = unsafe {
                env.new_object_unchecked(
                    self.class(descriptor.class),
                    self.registry.method(constructor),
                    &[JValue::Long(handle).as_jni()],
                )
            };
            take_exception(env, descriptor.class.binary_name())?;
            Ok(env.new_global_ref(object?)?)
        })
    }

    fn call(
        &self,
        target: &GlobalRef,
        method: ManagedMethod,
        args: &[Arg<'_, GlobalRef>],
    ) -> Result<ManagedValue> {
        let descriptor = method.descriptor();
        let return_type = match descriptor.returns {
            ReturnKind::Void => ReturnType::Primitive(Primitive::Void),
            ReturnKind::Object => ReturnType::Object,
            ReturnKind::Constructor => {
                return Err(BridgeError::managed(format!(
                    "{} is a constructor",
                    descriptor.name
                )))
            }
        };

        let mut env = self.env()?;
        env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| -> Result<ManagedValue> {
            let values = args
                .iter()
                .map(|arg| self.to_jvalue(env, arg))
                .collect::<Result<Vec<_>>>()?;
            let returned = unsafe {
                env.call_method_unchecked(
                    target.as_obj(),
                    self.registry.method(method),
                    return_type,
                    &values,
                )
            };
            take_exception(env, descriptor.name)?;

            match descriptor.returns {
                ReturnKind::Object => {
                    let object = returned?.l()?;
                    if object.is_null() {
                        return Ok(ManagedValue::Str(None));
                    }
                    let value: String = env.get_string(&JString::from(object))?.into();
                    Ok(ManagedValue::Str(Some(value)))
                }
                _ => {
                    returned?;
                    Ok(ManagedValue::Void)
                }
            }
        })
    }
}
