//! Instruction handlers. Each receives the resolved operand; the opcode table binds
//! them to an addressing mode and a cycle cost.

use crate::{
    bits,
    cpu::{
        addressing::Operand,
        cpu::CPU,
        flags::{PUSHED_BITS, UNUSED},
    },
};

// Load / store

pub(super) fn lda(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.read_operand(op);
    cpu.a.set(value);
    cpu.status.set_nz(value);
}

pub(super) fn ldx(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.read_operand(op);
    cpu.x.set(value);
    cpu.status.set_nz(value);
}

pub(super) fn ldy(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.read_operand(op);
    cpu.y.set(value);
    cpu.status.set_nz(value);
}

pub(super) fn sta(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.a.get();
    cpu.write_operand(op, value);
}

pub(super) fn stx(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.x.get();
    cpu.write_operand(op, value);
}

pub(super) fn sty(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.y.get();
    cpu.write_operand(op, value);
}

// Register transfers

pub(super) fn tax(cpu: &mut CPU<'_>, _: Operand) {
    cpu.x.set(cpu.a.get());
    cpu.status.set_nz(cpu.x.get());
}

pub(super) fn tay(cpu: &mut CPU<'_>, _: Operand) {
    cpu.y.set(cpu.a.get());
    cpu.status.set_nz(cpu.y.get());
}

pub(super) fn txa(cpu: &mut CPU<'_>, _: Operand) {
    cpu.a.set(cpu.x.get());
    cpu.status.set_nz(cpu.a.get());
}

pub(super) fn tya(cpu: &mut CPU<'_>, _: Operand) {
    cpu.a.set(cpu.y.get());
    cpu.status.set_nz(cpu.a.get());
}

pub(super) fn tsx(cpu: &mut CPU<'_>, _: Operand) {
    cpu.x.set(cpu.sp.get());
    cpu.status.set_nz(cpu.x.get());
}

/// No flags change.
pub(super) fn txs(cpu: &mut CPU<'_>, _: Operand) {
    cpu.sp.set(cpu.x.get());
}

// Stack

pub(super) fn pha(cpu: &mut CPU<'_>, _: Operand) {
    cpu.push(cpu.a.get());
}

pub(super) fn pla(cpu: &mut CPU<'_>, _: Operand) {
    let value = cpu.pop();
    cpu.a.set(value);
    cpu.status.set_nz(value);
}

/// The pushed copy always has B and bit 5 set.
pub(super) fn php(cpu: &mut CPU<'_>, _: Operand) {
    cpu.push(cpu.status.get() | PUSHED_BITS);
}

/// Bits 5 and 4 are not loadable; they keep their pre-pull values.
pub(super) fn plp(cpu: &mut CPU<'_>, _: Operand) {
    let kept = cpu.status.get() & PUSHED_BITS;
    let pulled = cpu.pop();
    cpu.status.set((pulled & !PUSHED_BITS) | kept);
}

// Logical

pub(super) fn and(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.a.get() & cpu.read_operand(op);
    cpu.a.set(value);
    cpu.status.set_nz(value);
}

pub(super) fn ora(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.a.get() | cpu.read_operand(op);
    cpu.a.set(value);
    cpu.status.set_nz(value);
}

pub(super) fn eor(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.a.get() ^ cpu.read_operand(op);
    cpu.a.set(value);
    cpu.status.set_nz(value);
}

/// Z from A & M; N and V straight from bits 7 and 6 of M.
pub(super) fn bit(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.read_operand(op);
    cpu.status.set_zero(cpu.a.get() & value == 0);
    cpu.status.set_negative(bits::check_bit(value, 7));
    cpu.status.set_overflow(bits::check_bit(value, 6));
}

// Arithmetic

/// Binary add with carry. The 2A03 has no decimal mode, so D is ignored.
fn add_with_carry(cpu: &mut CPU<'_>, value: u8) {
    let a = cpu.a.get();
    let sum = a as u16 + value as u16 + cpu.status.carry() as u16;
    let result = sum as u8;

    cpu.status.set_overflow((a ^ result) & (value ^ result) & 0x80 != 0);
    cpu.status.set_carry(sum > 0xFF);

    cpu.a.set(result);
    cpu.status.set_nz(result);
}

pub(super) fn adc(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.read_operand(op);
    add_with_carry(cpu, value);
}

/// A - M - !C is A + !M + C.
pub(super) fn sbc(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.read_operand(op);
    add_with_carry(cpu, value ^ 0xFF);
}

fn compare(cpu: &mut CPU<'_>, register: u8, op: Operand) {
    let value = cpu.read_operand(op);
    cpu.status.set_carry(register >= value);
    cpu.status.set_nz(register.wrapping_sub(value));
}

pub(super) fn cmp(cpu: &mut CPU<'_>, op: Operand) {
    let register = cpu.a.get();
    compare(cpu, register, op);
}

pub(super) fn cpx(cpu: &mut CPU<'_>, op: Operand) {
    let register = cpu.x.get();
    compare(cpu, register, op);
}

pub(super) fn cpy(cpu: &mut CPU<'_>, op: Operand) {
    let register = cpu.y.get();
    compare(cpu, register, op);
}

// Increments and decrements

pub(super) fn inc(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.read_operand(op).wrapping_add(1);
    cpu.write_operand(op, value);
    cpu.status.set_nz(value);
}

pub(super) fn dec(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.read_operand(op).wrapping_sub(1);
    cpu.write_operand(op, value);
    cpu.status.set_nz(value);
}

pub(super) fn inx(cpu: &mut CPU<'_>, _: Operand) {
    cpu.x.increment();
    cpu.status.set_nz(cpu.x.get());
}

pub(super) fn iny(cpu: &mut CPU<'_>, _: Operand) {
    cpu.y.increment();
    cpu.status.set_nz(cpu.y.get());
}

pub(super) fn dex(cpu: &mut CPU<'_>, _: Operand) {
    cpu.x.decrement();
    cpu.status.set_nz(cpu.x.get());
}

pub(super) fn dey(cpu: &mut CPU<'_>, _: Operand) {
    cpu.y.decrement();
    cpu.status.set_nz(cpu.y.get());
}

// Shifts and rotates: carry takes the bit shifted out, rotates shift the old carry in.

pub(super) fn asl(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.read_operand(op);
    let result = value << 1;
    cpu.status.set_carry(value & 0x80 != 0);
    cpu.write_operand(op, result);
    cpu.status.set_nz(result);
}

pub(super) fn lsr(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.read_operand(op);
    let result = value >> 1;
    cpu.status.set_carry(value & 0x01 != 0);
    cpu.write_operand(op, result);
    cpu.status.set_nz(result);
}

pub(super) fn rol(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.read_operand(op);
    let result = (value << 1) | cpu.status.carry() as u8;
    cpu.status.set_carry(value & 0x80 != 0);
    cpu.write_operand(op, result);
    cpu.status.set_nz(result);
}

pub(super) fn ror(cpu: &mut CPU<'_>, op: Operand) {
    let value = cpu.read_operand(op);
    let result = (value >> 1) | ((cpu.status.carry() as u8) << 7);
    cpu.status.set_carry(value & 0x01 != 0);
    cpu.write_operand(op, result);
    cpu.status.set_nz(result);
}

// Jumps and subroutines

pub(super) fn jmp(cpu: &mut CPU<'_>, op: Operand) {
    let target = cpu.operand_address(op);
    cpu.pc.set(target);
}

/// Pushes the address of the last operand byte, high byte first.
pub(super) fn jsr(cpu: &mut CPU<'_>, op: Operand) {
    let target = cpu.operand_address(op);
    let return_addr = cpu.pc.get().wrapping_sub(1);
    cpu.push((return_addr >> 8) as u8);
    cpu.push(return_addr as u8);
    cpu.pc.set(target);
}

pub(super) fn rts(cpu: &mut CPU<'_>, _: Operand) {
    let lo = cpu.pop();
    let hi = cpu.pop();
    cpu.pc.set(bits::combine_bytes(lo, hi).wrapping_add(1));
}

/// Bit 5 is forced on; B is taken from the pulled byte. No +1 on the return address.
pub(super) fn rti(cpu: &mut CPU<'_>, _: Operand) {
    let status = cpu.pop();
    cpu.status.set(bits::set_bit(status, UNUSED));

    let lo = cpu.pop();
    let hi = cpu.pop();
    cpu.pc.set(bits::combine_bytes(lo, hi));
}

// Branches

/// Taken: +1 cycle, and +2 more when the target is on another page than the
/// instruction that follows the branch.
fn branch(cpu: &mut CPU<'_>, op: Operand, condition: bool) {
    let Operand::Relative(offset) = op else {
        unreachable!("branch without a relative operand: {:?}", op);
    };

    if condition {
        let old_pc = cpu.pc.get();
        let new_pc = old_pc.wrapping_add(offset as u16);
        cpu.pc.set(new_pc);
        cpu.step_cycles += 1;

        if bits::page(old_pc) != bits::page(new_pc) {
            cpu.step_cycles += 2;
        }
    }
}

pub(super) fn bpl(cpu: &mut CPU<'_>, op: Operand) {
    let taken = !cpu.status.negative();
    branch(cpu, op, taken);
}

pub(super) fn bmi(cpu: &mut CPU<'_>, op: Operand) {
    let taken = cpu.status.negative();
    branch(cpu, op, taken);
}

pub(super) fn bvc(cpu: &mut CPU<'_>, op: Operand) {
    let taken = !cpu.status.overflow();
    branch(cpu, op, taken);
}

pub(super) fn bvs(cpu: &mut CPU<'_>, op: Operand) {
    let taken = cpu.status.overflow();
    branch(cpu, op, taken);
}

pub(super) fn bcc(cpu: &mut CPU<'_>, op: Operand) {
    let taken = !cpu.status.carry();
    branch(cpu, op, taken);
}

pub(super) fn bcs(cpu: &mut CPU<'_>, op: Operand) {
    let taken = cpu.status.carry();
    branch(cpu, op, taken);
}

pub(super) fn bne(cpu: &mut CPU<'_>, op: Operand) {
    let taken = !cpu.status.zero();
    branch(cpu, op, taken);
}

pub(super) fn beq(cpu: &mut CPU<'_>, op: Operand) {
    let taken = cpu.status.zero();
    branch(cpu, op, taken);
}

// Flags

pub(super) fn clc(cpu: &mut CPU<'_>, _: Operand) {
    cpu.status.set_carry(false);
}

pub(super) fn sec(cpu: &mut CPU<'_>, _: Operand) {
    cpu.status.set_carry(true);
}

pub(super) fn cli(cpu: &mut CPU<'_>, _: Operand) {
    cpu.status.set_interrupt_disable(false);
}

pub(super) fn sei(cpu: &mut CPU<'_>, _: Operand) {
    cpu.status.set_interrupt_disable(true);
}

pub(super) fn cld(cpu: &mut CPU<'_>, _: Operand) {
    cpu.status.set_decimal(false);
}

pub(super) fn sed(cpu: &mut CPU<'_>, _: Operand) {
    cpu.status.set_decimal(true);
}

pub(super) fn clv(cpu: &mut CPU<'_>, _: Operand) {
    cpu.status.set_overflow(false);
}

pub(super) fn nop(_: &mut CPU<'_>, _: Operand) {}
