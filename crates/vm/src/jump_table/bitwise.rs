//! Bitwise operations for the Neo Virtual Machine.
//!
//! This module provides the bitwise operation handlers for the Neo VM.

use crate::error::VmError;
use crate::error::VmResult;
use crate::execution_engine::ExecutionEngine;
use crate::instruction::Instruction;
use crate::jump_table::JumpTable;
use crate::op_code::OpCode;
use crate::stack_item::StackItem;

/// Registers the bitwise operation handlers.
pub fn register_handlers(jump_table: &mut JumpTable) {
    jump_table.register(OpCode::INVERT, invert);
    jump_table.register(OpCode::AND, and);
    jump_table.register(OpCode::OR, or);
    jump_table.register(OpCode::XOR, xor);
    jump_table.register(OpCode::EQUAL, equal);
    jump_table.register(OpCode::NOTEQUAL, not_equal);
}

/// Implements the INVERT operation.
fn invert(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    // Get the current context
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    // Pop the value from the stack
    let value = context.pop()?;

    // Invert the value
    let result = match value {
        StackItem::Integer(i) => {
            // Bitwise NOT
            StackItem::from_int(!i)
        }
        StackItem::Boolean(b) => {
            // Logical NOT
            StackItem::from_bool(!b)
        }
        _ => {
            // Convert to boolean and invert
            StackItem::from_bool(!value.as_bool()?)
        }
    };

    context.push(result)?;

    Ok(())
}

/// Implements the AND operation.
fn and(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    // Get the current context
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    // Pop the values from the stack
    let b = context.pop()?;
    let a = context.pop()?;

    // Perform the AND operation
    let result = match (&a, &b) {
        (StackItem::Integer(a), StackItem::Integer(b)) => {
            // Bitwise AND
            StackItem::from_int(a & b)
        }
        (StackItem::Boolean(a), StackItem::Boolean(b)) => StackItem::from_bool(*a && *b),
        (StackItem::ByteString(_), StackItem::ByteString(_)) => {
            // Convert ByteStrings to integers and perform bitwise AND
            let int_a = a.as_int()?;
            let int_b = b.as_int()?;
            StackItem::from_int(int_a & int_b)
        }
        _ => {
            return Err(VmError::invalid_operation_msg(format!(
                "AND operation not supported for types: {:?} and {:?}",
                a.stack_item_type(),
                b.stack_item_type()
            )));
        }
    };

    context.push(result)?;

    Ok(())
}

/// Implements the OR operation.
fn or(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    // Get the current context
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    // Pop the values from the stack
    let b = context.pop()?;
    let a = context.pop()?;

    // Perform the OR operation
    let result = match (&a, &b) {
        (StackItem::Integer(a), StackItem::Integer(b)) => {
            // Bitwise OR
            StackItem::from_int(a | b)
        }
        (StackItem::Boolean(a), StackItem::Boolean(b)) => StackItem::from_bool(*a || *b),
        (StackItem::ByteString(_), StackItem::ByteString(_)) => {
            // Convert ByteStrings to integers and perform bitwise OR
            let int_a = a.as_int()?;
            let int_b = b.as_int()?;
            StackItem::from_int(int_a | int_b)
        }
        _ => {
            return Err(VmError::invalid_operation_msg(format!(
                "OR operation not supported for types: {:?} and {:?}",
                a.stack_item_type(),
                b.stack_item_type()
            )));
        }
    };

    context.push(result)?;

    Ok(())
}

/// Implements the XOR operation.
fn xor(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    // Get the current context
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    // Pop the values from the stack
    let b = context.pop()?;
    let a = context.pop()?;

    // Perform the XOR operation
    let result = match (&a, &b) {
        (StackItem::Integer(a), StackItem::Integer(b)) => {
            // Bitwise XOR
            StackItem::from_int(a ^ b)
        }
        (StackItem::Boolean(a), StackItem::Boolean(b)) => StackItem::from_bool(*a != *b),
        (StackItem::ByteString(_), StackItem::ByteString(_)) => {
            // Convert ByteStrings to integers and perform bitwise XOR
            let int_a = a.as_int()?;
            let int_b = b.as_int()?;
            StackItem::from_int(int_a ^ int_b)
        }
        _ => {
            return Err(VmError::invalid_operation_msg(format!(
                "XOR operation not supported for types: {:?} and {:?}",
                a.stack_item_type(),
                b.stack_item_type()
            )));
        }
    };

    context.push(result)?;

    Ok(())
}

/// Implements the EQUAL operation.
fn equal(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    // Get the current context
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    // Check stack has at least 2 items
    if context.evaluation_stack().len() < 2 {
        return Err(VmError::insufficient_stack_items(
            2,
            context.evaluation_stack().len(),
        ));
    }

    // Pop the values from the stack
    let b = context.pop()?;
    let a = context.pop()?;

    // Compare the values
    let result = a.equals(&b)?;

    context.push(StackItem::from_bool(result))?;

    Ok(())
}

/// Implements the NOTEQUAL operation.
fn not_equal(engine: &mut ExecutionEngine, _instruction: &Instruction) -> VmResult<()> {
    // Get the current context
    let context = engine
        .current_context_mut()
        .ok_or_else(|| VmError::invalid_operation_msg("No current context"))?;

    // Pop the values from the stack
    let b = context.pop()?;
    let a = context.pop()?;

    // Compare the values
    let result = !a.equals(&b)?;

    context.push(StackItem::from_bool(result))?;

    Ok(())
}
